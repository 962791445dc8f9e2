//! Client configuration

use std::time::Duration;

/// Dashboard window and thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardQuery {
    /// Days covered by revenue, best sellers and order stats
    pub days: u32,
    /// Number of best sellers to fetch
    pub best_seller_limit: u32,
    /// Stock level at or below which a product is reported
    pub low_stock_threshold: u32,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            days: 7,
            best_seller_limit: 5,
            low_stock_threshold: 10,
        }
    }
}

/// Client configuration for connecting to the admin API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080/api")
    pub base_url: String,

    /// Bearer token supplied by the session layer
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Activity log page size
    pub page_size: u32,

    /// Dashboard fan-out parameters
    pub dashboard: DashboardQuery,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            page_size: 10,
            dashboard: DashboardQuery::default(),
        }
    }

    /// Read configuration from `CRAB_ADMIN_*` environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = DashboardQuery::default();
        Self {
            base_url: std::env::var("CRAB_ADMIN_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api".into()),
            token: std::env::var("CRAB_ADMIN_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            timeout: env_parse("CRAB_ADMIN_TIMEOUT").unwrap_or(30),
            page_size: env_parse("CRAB_ADMIN_PAGE_SIZE")
                .filter(|s| *s > 0)
                .unwrap_or(10),
            dashboard: DashboardQuery {
                days: env_parse("CRAB_ADMIN_STATS_DAYS").unwrap_or(defaults.days),
                best_seller_limit: env_parse("CRAB_ADMIN_TOP_LIMIT")
                    .unwrap_or(defaults.best_seller_limit),
                low_stock_threshold: env_parse("CRAB_ADMIN_LOW_STOCK_THRESHOLD")
                    .unwrap_or(defaults.low_stock_threshold),
            },
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the activity log page size (values below 1 are raised to 1)
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size.max(1);
        self
    }

    pub fn with_dashboard(mut self, dashboard: DashboardQuery) -> Self {
        self.dashboard = dashboard;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080/api")
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
