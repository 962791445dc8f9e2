//! API Response types
//!
//! Paged list bodies as sent by the log service, and the normalized
//! [`PageResult`] handed to callers.

use serde::{Deserialize, Serialize};

use crate::PageRequest;

/// Raw paged body: `{ "data": [...], "total": n, "page": p }`
///
/// Every field is optional on the wire. Missing `data` becomes an empty
/// list, missing `total` becomes 0 and missing `page` falls back to the
/// page that was requested.
#[derive(Debug, Clone, Deserialize)]
pub struct LogPageBody<T> {
    pub data: Option<Vec<T>>,
    pub total: Option<u64>,
    pub page: Option<u32>,
}

impl<T> LogPageBody<T> {
    pub fn into_page(self, request: PageRequest) -> PageResult<T> {
        PageResult {
            items: self.data.unwrap_or_default(),
            total_count: self.total.unwrap_or(0),
            page: self.page.filter(|p| *p > 0).unwrap_or(request.page),
            size: request.size,
        }
    }
}

/// 分页结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    /// Page echoed by the server (may differ from the requested one)
    pub page: u32,
    pub size: u32,
}

impl<T> PageResult<T> {
    /// `ceil(total_count / size)`
    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        let pages = self.total_count.div_ceil(u64::from(self.size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}
