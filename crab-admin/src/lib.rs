//! Crab Admin - audit log and dashboard core for the POS admin console
//!
//! Data retrieval, filtering, pagination and aggregation behind the audit
//! log screen and the statistics dashboard. Rendering is left to the
//! caller, which reads [`AuditState`] and [`DashboardState`].

pub mod activity_log;
pub mod audit;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod logger;
pub mod stats;

pub use activity_log::LogClient;
pub use audit::{AuditController, AuditState, FetchOutcome, LoadStatus};
pub use chart::{ChartSegment, order_status_segments};
pub use config::{ClientConfig, DashboardQuery};
pub use dashboard::{DashboardAggregator, DashboardState};
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use stats::StatsClient;

// Re-export shared types for convenience
pub use shared::models::{
    ActivityLogEntry, OrderStatusBreakdown, StatisticsSnapshot, UserRef,
};
pub use shared::{DateRange, LogFilter, PageRequest, PageResult, ValidationError};
