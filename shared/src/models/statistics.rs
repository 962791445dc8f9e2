//! Statistics Models
//!
//! 仪表盘统计数据结构（与后端 camelCase JSON 对齐）

use serde::{Deserialize, Serialize};

use crate::util::{deserialize_id, null_as_default};

/// Overview statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverviewStats {
    #[serde(deserialize_with = "null_as_default")]
    pub revenue: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub orders: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub customers: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub products: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub average_order_value: f64,
}

/// Revenue for one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevenuePoint {
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub revenue: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub orders: u64,
}

/// Top selling product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BestSeller {
    #[serde(deserialize_with = "deserialize_id")]
    pub product_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub revenue: f64,
}

/// Product at or below the stock threshold
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LowStockProduct {
    #[serde(deserialize_with = "deserialize_id")]
    pub product_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub stock: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub threshold: i64,
}

/// Order counts by status over the statistics window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderStats {
    #[serde(deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub completed: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub cancelled: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub pending: u64,
}

impl OrderStats {
    pub fn breakdown(&self) -> OrderStatusBreakdown {
        OrderStatusBreakdown {
            completed: self.completed,
            cancelled: self.cancelled,
        }
    }
}

/// Completed vs cancelled counts, the input of the order status chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusBreakdown {
    pub completed: u64,
    pub cancelled: u64,
}

impl OrderStatusBreakdown {
    /// Saturates at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.completed.saturating_add(self.cancelled)
    }

    /// `round(100 * value / total)`, or 0 when there are no orders
    pub fn percentage(&self, value: u64) -> u64 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (value as f64 * 100.0 / total as f64).round() as u64
    }
}

/// Consolidated dashboard data from one fetch generation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub overview: OverviewStats,
    pub revenue: Vec<RevenuePoint>,
    pub best_sellers: Vec<BestSeller>,
    pub low_stock: Vec<LowStockProduct>,
    pub order_stats: OrderStats,
}
