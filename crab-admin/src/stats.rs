//! Statistics API
//!
//! One method per dashboard endpoint. Each returns the typed schema from
//! `shared::models`; absent fields are defaulted there.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use shared::models::{BestSeller, LowStockProduct, OrderStats, OverviewStats, RevenuePoint};

use crate::ClientResult;
use crate::http::{HttpClient, decode};

/// Read-only client for `/statistics/*`
#[derive(Clone)]
pub struct StatsClient {
    http: Arc<dyn HttpClient>,
}

impl StatsClient {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// GET /statistics/overview
    pub async fn get_overview(&self) -> ClientResult<OverviewStats> {
        self.get("statistics/overview", &[]).await
    }

    /// GET /statistics/revenue?days=
    pub async fn get_revenue(&self, days: u32) -> ClientResult<Vec<RevenuePoint>> {
        self.get("statistics/revenue", &[("days", days.to_string())])
            .await
    }

    /// GET /statistics/bestsellers?limit=&days=
    pub async fn get_best_sellers(
        &self,
        limit: u32,
        days: u32,
    ) -> ClientResult<Vec<BestSeller>> {
        self.get(
            "statistics/bestsellers",
            &[("limit", limit.to_string()), ("days", days.to_string())],
        )
        .await
    }

    /// GET /statistics/lowstock?threshold=
    pub async fn get_low_stock_products(
        &self,
        threshold: u32,
    ) -> ClientResult<Vec<LowStockProduct>> {
        self.get("statistics/lowstock", &[("threshold", threshold.to_string())])
            .await
    }

    /// GET /statistics/orders?days=
    pub async fn get_order_stats(&self, days: u32) -> ClientResult<OrderStats> {
        self.get("statistics/orders", &[("days", days.to_string())])
            .await
    }

    async fn get<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> ClientResult<T> {
        let value = self.http.get_json(path, query).await?;
        if value.is_null() {
            return Ok(T::default());
        }
        decode(value)
    }
}
