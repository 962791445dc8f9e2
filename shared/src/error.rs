//! 输入校验错误
//!
//! 在发出任何请求之前同步返回给调用方。

use chrono::NaiveDate;
use thiserror::Error;

/// Validation failure raised before a request is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Start date is later than end date
    #[error("start date {start} is after end date {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    /// Date string is not `YYYY-MM-DD`
    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Page number or page size below 1
    #[error("{field} must be at least 1")]
    NotPositive { field: &'static str },
}
