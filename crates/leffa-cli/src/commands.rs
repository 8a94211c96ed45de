//! Command handlers. Each one builds the service from config, runs one
//! operation and prints pretty JSON to stdout.

use std::sync::Arc;
use std::time::Duration;

use leffa_analytics::{
    analyze_products, filter_products, FilterOptions, FixedPlaceholders, Granularity,
    PlaceholderMetrics, RandomPlaceholders,
};
use leffa_core::{AppConfig, RecentOrdersSort};
use leffa_merchant::{subscribe_to_analytics_updates, MerchantAnalytics};
use rust_decimal::Decimal;
use serde::Serialize;

fn build_service(
    config: &AppConfig,
    zero_placeholders: bool,
    sort: Option<RecentOrdersSort>,
) -> anyhow::Result<MerchantAnalytics> {
    let placeholders: Arc<dyn PlaceholderMetrics> = if zero_placeholders {
        Arc::new(FixedPlaceholders::default())
    } else {
        Arc::new(RandomPlaceholders)
    };
    Ok(MerchantAnalytics::from_config(config)?
        .with_placeholders(placeholders)
        .with_recent_orders_sort(sort.unwrap_or(config.recent_orders_sort)))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) async fn run_analytics(
    config: &AppConfig,
    zero_placeholders: bool,
    range: Granularity,
) -> anyhow::Result<()> {
    let service = build_service(config, zero_placeholders, None)?;
    let report = service.analytics_data(range).await;
    if report.sources.is_degraded() {
        tracing::warn!(sources = ?report.sources, "analytics built from incomplete data");
    }
    print_json(&report)
}

pub(crate) async fn run_summary(
    config: &AppConfig,
    zero_placeholders: bool,
    sort: Option<RecentOrdersSort>,
) -> anyhow::Result<()> {
    let service = build_service(config, zero_placeholders, sort)?;
    print_json(&service.dashboard_summary().await)
}

pub(crate) fn product_filter_options(
    include_placeholders: bool,
    include_inactive: bool,
    min_price: Option<Decimal>,
    min_stock: Option<i64>,
    categories: Vec<String>,
) -> FilterOptions {
    FilterOptions {
        exclude_placeholders: !include_placeholders,
        min_price,
        min_stock,
        active_only: !include_inactive,
        categories,
    }
}

#[derive(Serialize)]
struct ProductListing {
    products: Vec<leffa_core::Product>,
    stats: leffa_analytics::ProductStats,
}

/// Unlike the analytics commands this fails when the products endpoint does.
pub(crate) async fn run_products(config: &AppConfig, options: &FilterOptions) -> anyhow::Result<()> {
    let service = build_service(config, true, None)?;
    let raw = service.client().fetch_products().await?;
    let stats = analyze_products(&raw);
    let products = filter_products(raw, options);
    tracing::info!(
        total = stats.total,
        placeholders = stats.placeholders,
        listed = products.len(),
        "catalog loaded"
    );
    print_json(&ProductListing { products, stats })
}

pub(crate) async fn run_watch(
    config: &AppConfig,
    zero_placeholders: bool,
    interval_secs: Option<u64>,
    sort: Option<RecentOrdersSort>,
) -> anyhow::Result<()> {
    let interval_secs = interval_secs.unwrap_or(config.poll_interval_secs);
    anyhow::ensure!(interval_secs > 0, "--interval-secs must be greater than zero");

    let service = Arc::new(build_service(config, zero_placeholders, sort)?);
    let callback = Arc::new(|update: leffa_analytics::DashboardUpdate| {
        if let Err(e) = print_json(&update) {
            tracing::error!(error = %e, "failed to print dashboard update");
        }
    });

    let subscription =
        subscribe_to_analytics_updates(service, Duration::from_secs(interval_secs), callback).await?;
    tracing::info!(interval_secs, "watching merchant dashboard; press Ctrl-C to stop");

    let signal = tokio::signal::ctrl_c().await;
    subscription.unsubscribe().await?;
    signal?;
    Ok(())
}
