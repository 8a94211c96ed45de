//! Catalog cleanup.
//!
//! The inventory provider seeds every merchant account with a handful of
//! synthetic category products ("Electronics", "Clothes", ...) that have no
//! price, no stock and no description. They are not merchandise and must not
//! reach any metric.

use leffa_core::Product;
use rust_decimal::Decimal;
use serde::Serialize;

/// Names the provider uses for its seeded placeholder products.
pub const PLACEHOLDER_PRODUCT_NAMES: [&str; 8] = [
    "Electronics",
    "Clothes",
    "Medicines",
    "Food",
    "Documents",
    "Groceries",
    "Loose Goods",
    "Others",
];

/// `true` only when all four hold: zero price, zero stock, no real
/// description, and a name from [`PLACEHOLDER_PRODUCT_NAMES`].
#[must_use]
pub fn is_placeholder(product: &Product) -> bool {
    product.price().is_zero()
        && product.stock() == 0
        && !product.has_real_description()
        && product
            .name
            .as_deref()
            .is_some_and(|name| PLACEHOLDER_PRODUCT_NAMES.contains(&name))
}

/// Drops placeholder products and, unless `include_inactive`, anything not
/// `ACTIVE`. Input order is kept.
#[must_use]
pub fn filter_real_products(products: Vec<Product>, include_inactive: bool) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| !is_placeholder(p) && (include_inactive || p.is_active()))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub exclude_placeholders: bool,
    pub min_price: Option<Decimal>,
    pub min_stock: Option<i64>,
    pub active_only: bool,
    /// Allowed categories, matched against `category_name` or
    /// `category_code`. Empty allows everything.
    pub categories: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            exclude_placeholders: true,
            min_price: None,
            min_stock: None,
            active_only: false,
            categories: Vec::new(),
        }
    }
}

impl FilterOptions {
    fn allows(&self, product: &Product) -> bool {
        if self.exclude_placeholders && is_placeholder(product) {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price() < min) {
            return false;
        }
        if self.min_stock.is_some_and(|min| product.stock() < min) {
            return false;
        }
        if self.active_only && !product.is_active() {
            return false;
        }
        if !self.categories.is_empty() {
            let matches = |field: &Option<String>| {
                field
                    .as_deref()
                    .is_some_and(|value| self.categories.iter().any(|c| c == value))
            };
            if !matches(&product.category_name) && !matches(&product.category_code) {
                return false;
            }
        }
        true
    }
}

/// Applies every set option as an AND chain. Unset options pass everything.
///
/// Placeholder exclusion here ignores status, so `active_only` is a separate
/// decision.
#[must_use]
pub fn filter_products(products: Vec<Product>, options: &FilterOptions) -> Vec<Product> {
    products.into_iter().filter(|p| options.allows(p)).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total: usize,
    pub real: usize,
    pub placeholders: usize,
    pub active: usize,
    pub inactive: usize,
    pub in_stock: usize,
    pub out_of_stock: usize,
    /// `Σ price × stock` over real products.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
}

/// Catalog health counts. Every count except `total` and `placeholders` is
/// taken over the real (non-placeholder) products, active or not.
#[must_use]
pub fn analyze_products(products: &[Product]) -> ProductStats {
    let mut stats = ProductStats {
        total: products.len(),
        ..ProductStats::default()
    };

    for product in products {
        if is_placeholder(product) {
            stats.placeholders += 1;
            continue;
        }
        stats.real += 1;
        if product.is_active() {
            stats.active += 1;
        } else if product.is_inactive() {
            stats.inactive += 1;
        }
        if product.stock() > 0 {
            stats.in_stock += 1;
        } else {
            stats.out_of_stock += 1;
        }
        stats.total_value = stats.total_value.saturating_add(product.stock_value());
    }

    stats
}
