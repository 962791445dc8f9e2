//! User reference used by the log filter

use serde::{Deserialize, Serialize};

use crate::util::{deserialize_id, null_as_default};

/// 用户筛选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        alias = "username",
        alias = "name"
    )]
    pub display_name: String,
}
