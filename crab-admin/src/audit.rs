//! 审计日志控制器
//!
//! Owns the audit screen's view-state: filter inputs, pagination and the
//! last page of log entries. Lives as long as the screen does.
//!
//! # Request routing
//!
//! Every fetch re-evaluates the filter: a selected user or a complete date
//! range goes to `/activitylog/filter`, anything else to `/activitylog/paged`.
//!
//! # Out-of-order responses
//!
//! Fetches are not serialized; a new page request may start while an older
//! one is still in flight. Each fetch takes a generation number when it
//! starts and only the response carrying the latest generation is applied.
//! Older responses are dropped on arrival.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use shared::models::{ActivityLogEntry, UserRef};
use shared::{DateRange, LogFilter, ValidationError};
use tokio::sync::RwLock;

use crate::{ClientError, ClientResult, LogClient};

/// Load lifecycle shared by the audit and dashboard view-states
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// What happened to a fetch once its response came back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Response committed to state
    Applied,
    /// Request failed; error recorded, previous items kept
    Failed,
    /// A newer request was started meanwhile; response discarded
    Stale,
}

/// Audit screen view-state
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditState {
    pub status: LoadStatus,
    pub items: Vec<ActivityLogEntry>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
    #[serde(skip)]
    pub filter: LogFilter,
    pub users: Vec<UserRef>,
    /// Last fetch failure, shown as a non-blocking indicator
    pub error: Option<String>,
    /// Inline message for a rejected filter
    pub validation_error: Option<String>,
}

pub struct AuditController {
    logs: LogClient,
    generation: AtomicU64,
    state: RwLock<AuditState>,
}

impl AuditController {
    pub fn new(logs: LogClient, page_size: u32) -> Self {
        Self {
            logs,
            generation: AtomicU64::new(0),
            state: RwLock::new(AuditState {
                current_page: 1,
                page_size: page_size.max(1),
                ..Default::default()
            }),
        }
    }

    /// Snapshot of the current view-state
    pub async fn state(&self) -> AuditState {
        self.state.read().await.clone()
    }

    /// Change the user filter. Does not fetch.
    pub async fn select_user(&self, user: Option<&UserRef>) {
        self.state.write().await.filter.user_id = user.map(|u| u.id.clone());
    }

    /// Validate and store a filter without fetching.
    ///
    /// An inverted date range is rejected here: the message is kept in
    /// `validation_error`, the stored filter and the status are left alone.
    pub async fn set_filter(
        &self,
        user_id: Option<String>,
        date_range: DateRange,
    ) -> ClientResult<()> {
        if let Err(err) = date_range.validate() {
            return Err(self.reject(err).await);
        }

        let mut state = self.state.write().await;
        state.validation_error = None;
        state.filter = LogFilter {
            user_id,
            date_range,
        };
        Ok(())
    }

    /// [`set_filter`](Self::set_filter) from raw date-picker strings
    pub async fn set_raw_filter(
        &self,
        user_id: Option<String>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> ClientResult<()> {
        match DateRange::parse(start, end) {
            Ok(range) => self.set_filter(user_id, range).await,
            Err(err) => Err(self.reject(err).await),
        }
    }

    /// Validate and store a filter, then load its first page.
    ///
    /// A rejected filter sends nothing.
    pub async fn apply_filter(
        &self,
        user_id: Option<String>,
        date_range: DateRange,
    ) -> ClientResult<FetchOutcome> {
        self.set_filter(user_id, date_range).await?;
        self.request_page(1).await
    }

    /// [`apply_filter`](Self::apply_filter) from raw date-picker strings
    pub async fn apply_raw_filter(
        &self,
        user_id: Option<String>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> ClientResult<FetchOutcome> {
        self.set_raw_filter(user_id, start, end).await?;
        self.request_page(1).await
    }

    /// Drop every filter and load the first unfiltered page
    pub async fn clear_filter(&self) -> ClientResult<FetchOutcome> {
        {
            let mut state = self.state.write().await;
            state.filter = LogFilter::default();
            state.validation_error = None;
        }
        self.request_page(1).await
    }

    /// Load page `page` (1-based) with the current filter.
    ///
    /// Network, HTTP and decode failures do not surface as `Err`; they move
    /// the state to `Failed` and keep the previous items on screen.
    pub async fn request_page(&self, page: u32) -> ClientResult<FetchOutcome> {
        if page == 0 {
            return Err(ValidationError::NotPositive { field: "page" }.into());
        }

        let (generation, filter, size) = {
            let mut state = self.state.write().await;
            state.status = LoadStatus::Loading;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            (generation, state.filter.clone(), state.page_size)
        };

        let result = if filter.is_active() {
            tracing::debug!(generation, page, ?filter, "Fetching filtered activity log");
            self.logs.fetch_filtered(page, size, &filter).await
        } else {
            tracing::debug!(generation, page, "Fetching activity log");
            self.logs.fetch_paged(page, size).await
        };

        let mut state = self.state.write().await;
        let latest = self.generation.load(Ordering::SeqCst);
        if generation != latest {
            tracing::debug!(generation, latest, page, "Discarding stale activity log response");
            return Ok(FetchOutcome::Stale);
        }

        match result {
            Ok(result) => {
                state.total_pages = result.total_pages();
                state.total_count = result.total_count;
                state.current_page = result.page;
                state.items = result.items;
                state.status = LoadStatus::Loaded;
                state.error = None;
                Ok(FetchOutcome::Applied)
            }
            Err(err) => {
                tracing::warn!(page, error = %err, "Activity log fetch failed");
                state.status = LoadStatus::Failed;
                state.error = Some(err.to_string());
                Ok(FetchOutcome::Failed)
            }
        }
    }

    /// Reload the current page
    pub async fn refresh(&self) -> ClientResult<FetchOutcome> {
        let page = self.state.read().await.current_page;
        self.request_page(page).await
    }

    /// Next page, or `None` when already on the last one
    pub async fn next_page(&self) -> ClientResult<Option<FetchOutcome>> {
        let (current, total) = {
            let state = self.state.read().await;
            (state.current_page, state.total_pages)
        };
        if current >= total {
            return Ok(None);
        }
        self.request_page(current + 1).await.map(Some)
    }

    /// Previous page, or `None` when already on the first one
    pub async fn previous_page(&self) -> ClientResult<Option<FetchOutcome>> {
        let current = self.state.read().await.current_page;
        if current <= 1 {
            return Ok(None);
        }
        self.request_page(current - 1).await.map(Some)
    }

    /// Load the users offered in the filter dropdown
    pub async fn load_users(&self) -> FetchOutcome {
        let result = self.logs.fetch_users().await;
        let mut state = self.state.write().await;
        match result {
            Ok(users) => {
                tracing::debug!(count = users.len(), "Users loaded");
                state.users = users;
                FetchOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to load users");
                state.error = Some(err.to_string());
                FetchOutcome::Failed
            }
        }
    }

    async fn reject(&self, err: ValidationError) -> ClientError {
        tracing::debug!(error = %err, "Filter rejected");
        self.state.write().await.validation_error = Some(err.to_string());
        err.into()
    }
}
