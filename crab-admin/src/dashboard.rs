//! Dashboard aggregation
//!
//! Fetches the five statistics panels concurrently and commits them as one
//! snapshot. A snapshot is either committed whole or not at all: when any
//! panel fails the previous snapshot stays in place and the state is marked
//! `Failed`.
//!
//! Overlapping fetches are ordered the same way the audit log does it: each
//! fetch takes a generation number and only the latest one may touch the
//! state. An older fetch still returns its own result to its caller.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use shared::models::StatisticsSnapshot;
use tokio::sync::RwLock;

use crate::audit::LoadStatus;
use crate::chart::{ChartSegment, order_status_segments};
use crate::{ClientError, ClientResult, DashboardQuery, StatsClient};

/// 仪表盘视图状态
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    pub status: LoadStatus,
    /// Last fully successful snapshot
    pub snapshot: Option<StatisticsSnapshot>,
    pub error: Option<String>,
}

pub struct DashboardAggregator {
    stats: StatsClient,
    query: DashboardQuery,
    generation: AtomicU64,
    state: RwLock<DashboardState>,
}

impl DashboardAggregator {
    pub fn new(stats: StatsClient, query: DashboardQuery) -> Self {
        Self {
            stats,
            query,
            generation: AtomicU64::new(0),
            state: RwLock::new(DashboardState::default()),
        }
    }

    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Fetch overview, revenue, best sellers, low stock and order stats.
    ///
    /// The first failing endpoint aborts the rest (their futures are
    /// dropped) and is returned as [`ClientError::Aggregate`].
    pub async fn fetch_snapshot(&self) -> ClientResult<StatisticsSnapshot> {
        let generation = {
            let mut state = self.state.write().await;
            state.status = LoadStatus::Loading;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let q = self.query;
        let result = tokio::try_join!(
            tagged("overview", self.stats.get_overview()),
            tagged("revenue", self.stats.get_revenue(q.days)),
            tagged(
                "bestSellers",
                self.stats.get_best_sellers(q.best_seller_limit, q.days)
            ),
            tagged(
                "lowStock",
                self.stats.get_low_stock_products(q.low_stock_threshold)
            ),
            tagged("orderStats", self.stats.get_order_stats(q.days)),
        );

        let result = result.map(
            |(overview, revenue, best_sellers, low_stock, order_stats)| StatisticsSnapshot {
                overview,
                revenue,
                best_sellers,
                low_stock,
                order_stats,
            },
        );

        let mut state = self.state.write().await;
        let latest = self.generation.load(Ordering::SeqCst);
        if generation != latest {
            tracing::debug!(generation, latest, "Discarding stale dashboard response");
            return result;
        }

        match result {
            Ok(snapshot) => {
                tracing::info!(
                    revenue_points = snapshot.revenue.len(),
                    low_stock = snapshot.low_stock.len(),
                    "Dashboard snapshot committed"
                );
                state.snapshot = Some(snapshot.clone());
                state.status = LoadStatus::Loaded;
                state.error = None;
                Ok(snapshot)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Dashboard fetch failed, keeping previous snapshot");
                state.status = LoadStatus::Failed;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Order status chart for the committed snapshot
    pub async fn order_chart(&self) -> Option<Vec<ChartSegment>> {
        self.state
            .read()
            .await
            .snapshot
            .as_ref()
            .map(|s| order_status_segments(&s.order_stats.breakdown()))
    }
}

async fn tagged<T>(
    endpoint: &'static str,
    fetch: impl Future<Output = ClientResult<T>>,
) -> ClientResult<T> {
    fetch
        .await
        .map_err(|err| ClientError::aggregate(endpoint, err))
}
