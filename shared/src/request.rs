//! Request types for the shared crate
//!
//! Pagination and activity-log filter inputs, validated before they are
//! turned into query parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Wire format for dates in query strings
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query string pairs, in the order they are sent
pub type QueryParams = Vec<(&'static str, String)>;

/// Page request (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (>= 1)
    pub page: u32,
    /// Items per page (>= 1)
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Result<Self, ValidationError> {
        if page == 0 {
            return Err(ValidationError::NotPositive { field: "page" });
        }
        if size == 0 {
            return Err(ValidationError::NotPositive { field: "size" });
        }
        Ok(Self { page, size })
    }

    /// `page` and `size` query pairs
    pub fn query(&self) -> QueryParams {
        vec![("page", self.page.to_string()), ("size", self.size.to_string())]
    }
}

/// Optional date window for log filtering
///
/// Either end may be absent. When both are present the start must not be
/// after the end; an inverted range is rejected, never swapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Parse a range from raw `YYYY-MM-DD` inputs.
    ///
    /// Blank strings count as absent (a cleared date picker sends "").
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, ValidationError> {
        let range = Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let (Some(start), Some(end)) = (self.start, self.end)
            && start > end
        {
            return Err(ValidationError::InvertedDateRange { start, end });
        }
        Ok(())
    }

    /// Both ends set
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|_| ValidationError::InvalidDate {
                value: s.to_string(),
            }),
    }
}

/// 审计日志过滤条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub user_id: Option<String>,
    pub date_range: DateRange,
}

impl LogFilter {
    /// Whether the filtered endpoint should be used.
    ///
    /// A half-open date range alone does not count.
    pub fn is_active(&self) -> bool {
        self.user_id.is_some() || self.date_range.is_complete()
    }

    /// Filter query pairs; absent keys are left out entirely
    pub fn query(&self) -> QueryParams {
        let mut params = Vec::with_capacity(3);
        if let Some(user_id) = &self.user_id {
            params.push(("userId", user_id.clone()));
        }
        if let Some(start) = self.date_range.start {
            params.push(("startDate", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.date_range.end {
            params.push(("endDate", end.format(DATE_FORMAT).to_string()));
        }
        params
    }
}
