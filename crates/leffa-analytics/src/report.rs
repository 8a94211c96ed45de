use chrono::{DateTime, FixedOffset};
use leffa_core::{Order, Product};
use serde::Serialize;

use crate::buckets::{generate_time_buckets, Granularity};
use crate::catalog::filter_real_products;
use crate::categories::{build_category_distribution, CategoryShare};
use crate::placeholders::PlaceholderMetrics;
use crate::series::{build_sales_series, SalesPoint};
use crate::sources::{Fetched, SourceHealth};
use crate::summary::{compute_summary, SummaryKpis};
use crate::top_products::{top_performing_products, TopProduct};

/// Everything the analytics page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    pub sales_data: Vec<SalesPoint>,
    pub category_data: Vec<CategoryShare>,
    pub top_products: Vec<TopProduct>,
    pub summary: SummaryKpis,
    pub sources: SourceHealth,
}

/// Builds the analytics report from already-fetched sources.
///
/// Products are reduced to active, non-placeholder entries before the
/// category and top-product views. The summary covers every order, including
/// those outside the chart window.
#[must_use]
pub fn build_analytics_report(
    orders: Fetched<Order>,
    products: Fetched<Product>,
    granularity: Granularity,
    now: DateTime<FixedOffset>,
    placeholders: &dyn PlaceholderMetrics,
) -> AnalyticsResult {
    let products_status = products.status;
    let catalog = filter_real_products(products.items, false);

    let buckets = generate_time_buckets(now, granularity);
    let sales_data = build_sales_series(&orders.items, &buckets, now.offset());

    tracing::debug!(
        %granularity,
        orders = orders.items.len(),
        products = catalog.len(),
        "built analytics report"
    );

    AnalyticsResult {
        sales_data,
        category_data: build_category_distribution(&catalog),
        top_products: top_performing_products(&catalog, placeholders),
        summary: compute_summary(&orders.items),
        sources: SourceHealth {
            orders: orders.status,
            products: products_status,
        },
    }
}
