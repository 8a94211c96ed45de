use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::numeric::{decimal_from_value, integer_from_value};

pub const ACTIVE_STATUS: &str = "ACTIVE";
pub const INACTIVE_STATUS: &str = "INACTIVE";

/// Category label used when a product has no `category_name`.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Descriptions the inventory provider writes when the merchant left the
/// field empty. They do not count as a real description.
pub const EMPTY_DESCRIPTION_SENTINELS: [&str; 2] = ["No description", "No description available"];

/// A catalog entry from `GET /api/merchant/shiprocket/products`.
///
/// Field names follow the provider's snake_case wire format. Unknown fields
/// are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Provider ID; numeric on the wire but kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Maximum retail price as a decimal string, e.g. `"1499.00"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrp: Option<Value>,
    /// Units in stock as an integer string, e.g. `"12"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,
    /// `"ACTIVE"` or `"INACTIVE"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Unit price from `mrp`, zero when missing or unparseable.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.mrp
            .as_ref()
            .and_then(decimal_from_value)
            .unwrap_or(Decimal::ZERO)
    }

    /// Units in stock from `quantity`, zero when missing or unparseable.
    #[must_use]
    pub fn stock(&self) -> i64 {
        self.quantity
            .as_ref()
            .and_then(integer_from_value)
            .unwrap_or(0)
    }

    /// `price × stock`, used both for inventory value and for ranking.
    /// Pins at `Decimal::MAX` / `Decimal::MIN` when the product is out of
    /// range.
    #[must_use]
    pub fn stock_value(&self) -> Decimal {
        self.price().saturating_mul(Decimal::from(self.stock()))
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some(ACTIVE_STATUS)
    }

    #[must_use]
    pub fn is_inactive(&self) -> bool {
        self.status.as_deref() == Some(INACTIVE_STATUS)
    }

    /// `true` when the description is non-empty and not one of the
    /// provider's "no description" sentinels.
    #[must_use]
    pub fn has_real_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| !d.is_empty() && !EMPTY_DESCRIPTION_SENTINELS.contains(&d))
    }

    /// `category_name`, or [`UNCATEGORIZED`] when absent or empty.
    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category_name
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED)
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product_from(value: Value) -> Product {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn price_and_stock_parse_provider_strings() {
        let product = product_from(json!({ "mrp": "1499.00", "quantity": "12" }));
        assert_eq!(product.price(), Decimal::from(1499));
        assert_eq!(product.stock(), 12);
        assert_eq!(product.stock_value(), Decimal::from(17_988));
    }

    #[test]
    fn stock_value_saturates_instead_of_overflowing() {
        let product = product_from(json!({
            "mrp": "99999999999999999999999",
            "quantity": "1000000",
        }));
        assert_eq!(product.stock_value(), Decimal::MAX);

        let product = product_from(json!({ "mrp": "-99999999999999999999999", "quantity": 1_000_000 }));
        assert_eq!(product.stock_value(), Decimal::MIN);
    }

    #[test]
    fn price_and_stock_default_to_zero() {
        let product = product_from(json!({ "mrp": "free", "quantity": null }));
        assert_eq!(product.price(), Decimal::ZERO);
        assert_eq!(product.stock(), 0);
    }

    #[test]
    fn sentinel_descriptions_are_not_real() {
        for desc in ["No description", "No description available", ""] {
            let product = product_from(json!({ "description": desc }));
            assert!(!product.has_real_description(), "{desc:?} should not count");
        }
        assert!(!product_from(json!({})).has_real_description());
        assert!(product_from(json!({ "description": "Linen kurta" })).has_real_description());
    }

    #[test]
    fn category_label_defaults_to_uncategorized() {
        assert_eq!(product_from(json!({})).category_label(), UNCATEGORIZED);
        assert_eq!(
            product_from(json!({ "category_name": "" })).category_label(),
            UNCATEGORIZED
        );
        assert_eq!(
            product_from(json!({ "category_name": "Dresses" })).category_label(),
            "Dresses"
        );
    }

    #[test]
    fn status_checks_are_exact() {
        assert!(product_from(json!({ "status": "ACTIVE" })).is_active());
        assert!(!product_from(json!({ "status": "active" })).is_active());
        assert!(product_from(json!({ "status": "INACTIVE" })).is_inactive());
    }
}
