use leffa_core::Product;
use serde::Serialize;
use serde_json::Value;

use crate::placeholders::PlaceholderMetrics;

pub const TOP_PRODUCT_COUNT: usize = 5;

/// Above this many units a product is `in_stock`; from 1 up to it, `low_stock`.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    #[must_use]
    pub const fn from_stock(stock: i64) -> Self {
        if stock > LOW_STOCK_THRESHOLD {
            StockStatus::InStock
        } else if stock > 0 {
            StockStatus::LowStock
        } else {
            StockStatus::OutOfStock
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    pub id: Option<Value>,
    pub name: String,
    /// Synthetic, see [`PlaceholderMetrics::product_sales`].
    pub sales: u32,
    /// Synthetic, see [`PlaceholderMetrics::product_sales`].
    pub revenue: u32,
    pub category: String,
    pub stock: i64,
    pub status: StockStatus,
}

/// Ranks products by revenue potential (`price × stock`) and returns the
/// top five. Equal potentials keep their input order.
#[must_use]
pub fn top_performing_products(
    products: &[Product],
    placeholders: &dyn PlaceholderMetrics,
) -> Vec<TopProduct> {
    let mut ranked: Vec<&Product> = products.iter().collect();
    ranked.sort_by_key(|p| std::cmp::Reverse(p.stock_value()));

    ranked
        .into_iter()
        .take(TOP_PRODUCT_COUNT)
        .map(|product| {
            let stock = product.stock();
            let estimate = placeholders.product_sales(product);
            TopProduct {
                id: product.id.clone(),
                name: product.display_name().to_string(),
                sales: estimate.sales,
                revenue: estimate.revenue,
                category: product.category_label().to_string(),
                stock,
                status: StockStatus::from_stock(stock),
            }
        })
        .collect()
}
