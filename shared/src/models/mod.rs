//! Data models
//!
//! Response schemas for the statistics and activity-log endpoints.
//! Every field defaults when the server leaves it out.

pub mod activity_log;
pub mod statistics;
pub mod user;

// Re-exports
pub use activity_log::*;
pub use statistics::*;
pub use user::*;
