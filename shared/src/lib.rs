//! Shared types for Crab Admin
//!
//! Wire schemas and value types used by the admin client: pagination,
//! date filters, activity-log records and statistics DTOs.

pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use error::ValidationError;
pub use request::{DateRange, LogFilter, PageRequest, QueryParams};
pub use response::{LogPageBody, PageResult};
pub use serde::{Deserialize, Serialize};
