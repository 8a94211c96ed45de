use chrono::{DateTime, FixedOffset};
use leffa_core::Order;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::buckets::TimeBucket;
use crate::dates::parse_date_value;

/// Visitors assumed per order. No traffic data exists, so every "visitors"
/// figure is `orders × VISITORS_PER_ORDER`.
pub const VISITORS_PER_ORDER: usize = 10;

/// One point of the sales chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesPoint {
    /// Bucket label.
    pub name: String,
    /// Order value in the bucket, rounded half up to a whole unit.
    pub sales: i64,
    pub orders: usize,
    /// Estimated, see [`VISITORS_PER_ORDER`].
    pub visitors: usize,
}

/// Assigns orders to `buckets` and totals each one.
///
/// Orders whose date is missing or unparseable are left out of every bucket.
/// `offset` is used to read zone-less provider timestamps.
#[must_use]
pub fn build_sales_series(
    orders: &[Order],
    buckets: &[TimeBucket],
    offset: &FixedOffset,
) -> Vec<SalesPoint> {
    let dated: Vec<(DateTime<FixedOffset>, Decimal)> = orders
        .iter()
        .filter_map(|order| {
            let Some(at) = order.date_value().and_then(|v| parse_date_value(v, offset)) else {
                tracing::debug!(
                    raw = ?order.date_value(),
                    "order has no usable date; leaving it out of the sales series"
                );
                return None;
            };
            Some((at, order.order_value()))
        })
        .collect();

    buckets
        .iter()
        .map(|bucket| {
            let (count, total) = dated
                .iter()
                .filter(|(at, _)| bucket.contains(at))
                .fold((0usize, Decimal::ZERO), |(n, sum), (_, value)| {
                    (n + 1, sum.saturating_add(*value))
                });

            SalesPoint {
                name: bucket.label.clone(),
                sales: round_half_up(total),
                orders: count,
                visitors: count * VISITORS_PER_ORDER,
            }
        })
        .collect()
}

/// Rounds to the nearest integer with halves going up, so `2.5 → 3` and
/// `-2.5 → -2`. Totals beyond `i64` pin at its bounds.
fn round_half_up(value: Decimal) -> i64 {
    let rounded = value.saturating_add(Decimal::new(5, 1)).floor();
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}
