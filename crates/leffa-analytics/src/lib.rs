//! Merchant analytics aggregation.
//!
//! Everything in this crate is a pure function of already-fetched order and
//! product collections plus a reference instant; fetching lives in
//! `leffa-merchant`.

pub mod buckets;
pub mod catalog;
pub mod categories;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod placeholders;
pub mod report;
pub mod series;
pub mod sources;
pub mod summary;
pub mod top_products;

pub use buckets::{generate_time_buckets, Granularity, TimeBucket};
pub use catalog::{
    analyze_products, filter_products, filter_real_products, is_placeholder, FilterOptions,
    ProductStats,
};
pub use categories::{build_category_distribution, CategoryShare};
pub use dashboard::{build_dashboard_summary, DashboardSummary, DashboardUpdate};
pub use dates::{parse_date_value, parse_flexible_date};
pub use error::AnalyticsError;
pub use placeholders::{FixedPlaceholders, PlaceholderMetrics, ProductSalesEstimate, RandomPlaceholders};
pub use report::{build_analytics_report, AnalyticsResult};
pub use series::{build_sales_series, SalesPoint};
pub use sources::{Fetched, SourceHealth, SourceStatus};
pub use summary::{compute_summary, SummaryKpis};
pub use top_products::{top_performing_products, StockStatus, TopProduct};
