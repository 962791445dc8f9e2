//! Activity log entry

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One audit event, exactly as the log service sent it.
///
/// The admin client never interprets the fields (actor, action, target,
/// timestamp, ip, payload); the record is passed through to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLogEntry(Value);

impl ActivityLogEntry {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for ActivityLogEntry {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
