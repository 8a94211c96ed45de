//! Fetch-then-aggregate entry points.
//!
//! Both sources are fetched concurrently. A failed source is logged, turned
//! into an empty collection with a `failed` status, and the aggregation runs
//! anyway.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use leffa_analytics::{
    build_analytics_report, build_dashboard_summary, AnalyticsResult, DashboardSummary,
    DashboardUpdate, Fetched, Granularity, PlaceholderMetrics, RandomPlaceholders,
};
use leffa_core::{AppConfig, Order, Product, RecentOrdersSort};

use crate::client::MerchantClient;
use crate::error::MerchantError;

pub struct MerchantAnalytics {
    client: MerchantClient,
    offset: FixedOffset,
    recent_orders_sort: RecentOrdersSort,
    placeholders: Arc<dyn PlaceholderMetrics>,
}

impl MerchantAnalytics {
    /// Uses random placeholder metrics and source-ordered recent orders.
    #[must_use]
    pub fn new(client: MerchantClient, offset: FixedOffset) -> Self {
        Self {
            client,
            offset,
            recent_orders_sort: RecentOrdersSort::default(),
            placeholders: Arc::new(RandomPlaceholders),
        }
    }

    /// Builds the client and service from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns any error from [`MerchantClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, MerchantError> {
        let client = MerchantClient::new(config)?;
        Ok(Self::new(client, config.utc_offset).with_recent_orders_sort(config.recent_orders_sort))
    }

    #[must_use]
    pub fn with_recent_orders_sort(mut self, sort: RecentOrdersSort) -> Self {
        self.recent_orders_sort = sort;
        self
    }

    #[must_use]
    pub fn with_placeholders(mut self, placeholders: Arc<dyn PlaceholderMetrics>) -> Self {
        self.placeholders = placeholders;
        self
    }

    #[must_use]
    pub fn client(&self) -> &MerchantClient {
        &self.client
    }

    /// Current instant in the reporting offset.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    /// Fetches orders and products concurrently. Never fails.
    pub async fn fetch_sources(&self) -> (Fetched<Order>, Fetched<Product>) {
        let (orders, products) =
            tokio::join!(self.client.fetch_orders(), self.client.fetch_products());
        (soften("orders", orders), soften("products", products))
    }

    /// Sales chart, category split, top products and summary KPIs for
    /// `granularity`.
    pub async fn analytics_data(&self, granularity: Granularity) -> AnalyticsResult {
        let (orders, products) = self.fetch_sources().await;
        build_analytics_report(orders, products, granularity, self.now(), self.placeholders.as_ref())
    }

    /// Merchant home-screen numbers.
    pub async fn dashboard_summary(&self) -> DashboardSummary {
        let (orders, products) = self.fetch_sources().await;
        build_dashboard_summary(
            orders,
            products,
            self.now(),
            self.recent_orders_sort,
            self.placeholders.as_ref(),
        )
    }

    /// Dashboard summary plus the derived analytics summary block, as sent to
    /// poll subscribers.
    pub async fn dashboard_update(&self) -> DashboardUpdate {
        DashboardUpdate::from(self.dashboard_summary().await)
    }
}

fn soften<T>(source: &'static str, result: Result<Vec<T>, MerchantError>) -> Fetched<T> {
    match result {
        Ok(items) => Fetched::ok(items),
        Err(e) => {
            tracing::warn!(source, error = %e, "merchant fetch failed; continuing with no data");
            Fetched::failed(e.to_string())
        }
    }
}
