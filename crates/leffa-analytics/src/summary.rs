use leffa_core::numeric::saturating_sum;
use leffa_core::Order;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::series::VISITORS_PER_ORDER;

/// Headline numbers for the analytics page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryKpis {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
    pub total_orders: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_order_value: Decimal,
    /// Percent. Derived from the estimated visitor count, so it is 10
    /// whenever there is at least one order.
    #[serde(with = "rust_decimal::serde::float")]
    pub conversion_rate: Decimal,
}

/// Totals over every order passed in, bucketed or not.
#[must_use]
pub fn compute_summary(orders: &[Order]) -> SummaryKpis {
    let total_sales = saturating_sum(orders.iter().map(Order::order_value));
    let total_orders = orders.len();

    if total_orders == 0 {
        return SummaryKpis {
            total_sales,
            ..SummaryKpis::default()
        };
    }

    let count = Decimal::from(total_orders);
    let visitors = Decimal::from(total_orders * VISITORS_PER_ORDER);
    SummaryKpis {
        total_sales,
        total_orders,
        average_order_value: total_sales / count,
        conversion_rate: count / visitors * Decimal::ONE_HUNDRED,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn order(total: serde_json::Value) -> Order {
        serde_json::from_value(json!({ "total": total })).unwrap()
    }

    #[test]
    fn no_orders_means_zero_average() {
        let kpis = compute_summary(&[]);
        assert_eq!(kpis.total_orders, 0);
        assert_eq!(kpis.average_order_value, Decimal::ZERO);
        assert_eq!(kpis.conversion_rate, Decimal::ZERO);
    }

    #[test]
    fn totals_and_average() {
        let orders = vec![order(json!("100")), order(json!(50)), order(json!("n/a"))];
        let kpis = compute_summary(&orders);
        assert_eq!(kpis.total_sales, Decimal::from(150));
        assert_eq!(kpis.total_orders, 3);
        assert_eq!(kpis.average_order_value, Decimal::from(50));
        assert_eq!(kpis.conversion_rate, Decimal::from(10));
    }

    #[test]
    fn out_of_range_totals_saturate() {
        let orders = vec![order(json!("79228162514264337593543950335")), order(json!("1"))];
        let kpis = compute_summary(&orders);
        assert_eq!(kpis.total_sales, Decimal::MAX);
        assert_eq!(kpis.total_orders, 2);
        assert_eq!(kpis.average_order_value, Decimal::MAX / Decimal::from(2));
    }

    #[test]
    fn serializes_as_camel_case_numbers() {
        let kpis = compute_summary(&[order(json!("80"))]);
        let rendered = serde_json::to_value(&kpis).unwrap();
        assert_eq!(rendered["totalSales"], json!(80.0));
        assert_eq!(rendered["averageOrderValue"], json!(80.0));
        assert_eq!(rendered["conversionRate"], json!(10.0));
        assert_eq!(rendered["totalOrders"], json!(1));
    }
}
