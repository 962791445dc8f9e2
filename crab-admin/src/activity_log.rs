//! Activity log API
//!
//! 审计日志的分页查询与条件查询，以及筛选下拉框使用的用户列表。

use std::sync::Arc;

use shared::models::{ActivityLogEntry, UserRef};
use shared::{LogFilter, LogPageBody, PageRequest, PageResult};

use crate::ClientResult;
use crate::http::{HttpClient, decode};

const PAGED_PATH: &str = "activitylog/paged";
const FILTER_PATH: &str = "activitylog/filter";
const USERS_PATH: &str = "users/getalluser";

/// Read-only client for the activity log service
#[derive(Clone)]
pub struct LogClient {
    http: Arc<dyn HttpClient>,
}

impl LogClient {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// GET /activitylog/paged
    pub async fn fetch_paged(
        &self,
        page: u32,
        size: u32,
    ) -> ClientResult<PageResult<ActivityLogEntry>> {
        let request = PageRequest::new(page, size)?;
        self.fetch_page(PAGED_PATH, request, request.query()).await
    }

    /// GET /activitylog/filter
    ///
    /// Only the filter keys that are set go into the query string.
    pub async fn fetch_filtered(
        &self,
        page: u32,
        size: u32,
        filter: &LogFilter,
    ) -> ClientResult<PageResult<ActivityLogEntry>> {
        let request = PageRequest::new(page, size)?;
        filter.date_range.validate()?;

        let mut query = request.query();
        query.extend(filter.query());
        self.fetch_page(FILTER_PATH, request, query).await
    }

    /// GET /users/getalluser
    pub async fn fetch_users(&self) -> ClientResult<Vec<UserRef>> {
        let value = self.http.get_json(USERS_PATH, &[]).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        decode(value)
    }

    async fn fetch_page(
        &self,
        path: &str,
        request: PageRequest,
        query: shared::QueryParams,
    ) -> ClientResult<PageResult<ActivityLogEntry>> {
        let value = self.http.get_json(path, &query).await?;
        let body: LogPageBody<ActivityLogEntry> = decode(value)?;
        let page = body.into_page(request);
        tracing::debug!(
            path,
            page = page.page,
            items = page.items.len(),
            total = page.total_count,
            "Activity log page received"
        );
        Ok(page)
    }
}
