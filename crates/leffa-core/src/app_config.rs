use chrono::FixedOffset;

use crate::orders::RecentOrdersSort;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Origin serving the merchant API, e.g. `"https://shop.example.com"`.
    pub merchant_base_url: String,
    pub merchant_api_token: Option<String>,
    pub env: Environment,
    pub log_level: String,
    pub http_timeout_secs: u64,
    pub http_user_agent: String,
    pub http_max_retries: u32,
    pub http_retry_backoff_base_ms: u64,
    pub poll_interval_secs: u64,
    /// Offset used for calendar-day boundaries ("today", daily buckets) and
    /// for provider timestamps that carry no zone of their own.
    pub utc_offset: FixedOffset,
    pub recent_orders_sort: RecentOrdersSort,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("merchant_base_url", &self.merchant_base_url)
            .field(
                "merchant_api_token",
                &self.merchant_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_user_agent", &self.http_user_agent)
            .field("http_max_retries", &self.http_max_retries)
            .field(
                "http_retry_backoff_base_ms",
                &self.http_retry_backoff_base_ms,
            )
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("utc_offset", &self.utc_offset)
            .field("recent_orders_sort", &self.recent_orders_sort)
            .finish()
    }
}
