//! 订单状态图表数据
//!
//! Pure derivation from order counts to the segments the pie chart draws.

use serde::Serialize;
use shared::models::OrderStatusBreakdown;

pub const COMPLETED_LABEL: &str = "Completed";
pub const CANCELLED_LABEL: &str = "Cancelled";

/// One labelled slice of the order status chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSegment {
    pub label: &'static str,
    pub value: u64,
    /// e.g. `"75%"`
    pub percentage: String,
}

/// Completed and cancelled segments, in that order.
///
/// A zero total yields `"0%"` for both.
pub fn order_status_segments(breakdown: &OrderStatusBreakdown) -> Vec<ChartSegment> {
    [
        (COMPLETED_LABEL, breakdown.completed),
        (CANCELLED_LABEL, breakdown.cancelled),
    ]
    .into_iter()
    .map(|(label, value)| ChartSegment {
        label,
        value,
        percentage: format!("{}%", breakdown.percentage(value)),
    })
    .collect()
}
