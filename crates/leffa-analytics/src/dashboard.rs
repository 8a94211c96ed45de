use chrono::{DateTime, FixedOffset};
use leffa_core::numeric::saturating_sum;
use leffa_core::{Order, Product, RecentOrdersSort};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::filter_real_products;
use crate::dates::{local_midnight, parse_date_value};
use crate::placeholders::PlaceholderMetrics;
use crate::sources::{Fetched, SourceHealth};
use crate::summary::SummaryKpis;

pub const RECENT_ORDER_COUNT: usize = 5;

/// Lowercased statuses that no longer need merchant attention.
pub const CLOSED_ORDER_STATUSES: [&str; 3] = ["delivered", "cancelled", "completed"];

/// Conversion rate reported on every poll. There is no traffic data behind it.
pub const POLLED_CONVERSION_RATE: i64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub today_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    pub active_orders: usize,
    pub total_orders: usize,
    pub total_products: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_inventory_value: Decimal,
    /// Synthetic, see [`PlaceholderMetrics::unread_messages`].
    pub unread_messages: u32,
    pub recent_orders: Vec<Order>,
    pub sources: SourceHealth,
}

/// What the poller hands to subscribers: the dashboard plus the analytics
/// summary block derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardUpdate {
    #[serde(flatten)]
    pub dashboard: DashboardSummary,
    pub summary: SummaryKpis,
}

impl From<DashboardSummary> for DashboardUpdate {
    fn from(dashboard: DashboardSummary) -> Self {
        let average_order_value =
            if dashboard.total_revenue.is_zero() || dashboard.total_orders == 0 {
                Decimal::ZERO
            } else {
                dashboard.total_revenue / Decimal::from(dashboard.total_orders)
            };

        let summary = SummaryKpis {
            total_sales: dashboard.total_revenue,
            total_orders: dashboard.total_orders,
            average_order_value,
            conversion_rate: Decimal::from(POLLED_CONVERSION_RATE),
        };
        Self { dashboard, summary }
    }
}

/// Builds the merchant home-screen numbers.
///
/// "Today" starts at local midnight in `now`'s offset; orders without a
/// usable date never count toward it. Inventory covers active,
/// non-placeholder products only.
#[must_use]
pub fn build_dashboard_summary(
    orders: Fetched<Order>,
    products: Fetched<Product>,
    now: DateTime<FixedOffset>,
    sort: RecentOrdersSort,
    placeholders: &dyn PlaceholderMetrics,
) -> DashboardSummary {
    let offset = *now.offset();
    let today_start = local_midnight(now.date_naive(), &offset);
    let catalog = filter_real_products(products.items, false);
    let orders_status = orders.status;
    let orders = orders.items;

    let today_revenue = saturating_sum(
        orders
            .iter()
            .filter(|order| {
                order
                    .date_value()
                    .and_then(|v| parse_date_value(v, &offset))
                    .is_some_and(|at| at >= today_start)
            })
            .map(Order::order_value),
    );
    let total_revenue = saturating_sum(orders.iter().map(Order::order_value));

    let active_orders = orders
        .iter()
        .filter(|order| !CLOSED_ORDER_STATUSES.contains(&order.normalized_status().as_str()))
        .count();

    DashboardSummary {
        today_revenue,
        total_revenue,
        active_orders,
        total_orders: orders.len(),
        total_products: catalog.len(),
        total_inventory_value: saturating_sum(catalog.iter().map(Product::stock_value)),
        unread_messages: placeholders.unread_messages(),
        recent_orders: recent_orders(orders, sort, &offset),
        sources: SourceHealth {
            orders: orders_status,
            products: products.status,
        },
    }
}

fn recent_orders(mut orders: Vec<Order>, sort: RecentOrdersSort, offset: &FixedOffset) -> Vec<Order> {
    if sort == RecentOrdersSort::NewestFirst {
        // Stable, so undated orders keep their relative order at the end.
        orders.sort_by_cached_key(|order| {
            std::cmp::Reverse(order.date_value().and_then(|v| parse_date_value(v, offset)))
        });
    }
    orders.truncate(RECENT_ORDER_COUNT);
    orders
}
