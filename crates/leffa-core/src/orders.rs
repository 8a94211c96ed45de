use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::numeric::{decimal_from_value, is_truthy};
use crate::CoreError;

/// A merchant order as returned by `GET /api/merchant/orders`.
///
/// Only the fields the analytics read are typed; everything else the API
/// sends (customer, items, payment status, ...) is kept in `extra` so an
/// order can be handed back to the caller verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order total as a decimal string or number, e.g. `"1299.00"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Value>,
    /// Alternate total field used by some order sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    /// Provider timestamp, usually `"28 Jul 2025, 01:16 PM"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    /// Numeric order value: `total`, falling back to `amount` when `total`
    /// is missing, empty or zero. Unparseable values count as zero.
    #[must_use]
    pub fn order_value(&self) -> Decimal {
        let raw = match &self.total {
            Some(total) if is_truthy(total) => Some(total),
            _ => self.amount.as_ref(),
        };
        raw.and_then(decimal_from_value).unwrap_or(Decimal::ZERO)
    }

    /// The raw timestamp used for date bucketing: `createdAt`, falling back
    /// to `orderDate`. `None` when neither is usable.
    #[must_use]
    pub fn date_value(&self) -> Option<&Value> {
        [&self.created_at, &self.order_date]
            .into_iter()
            .flatten()
            .find(|v| is_truthy(v))
    }

    /// Lowercased status, empty when absent.
    #[must_use]
    pub fn normalized_status(&self) -> String {
        self.status.as_deref().unwrap_or_default().to_lowercase()
    }
}

/// How the dashboard picks its "recent orders".
///
/// The merchant orders endpoint currently returns newest-first, but that is
/// not part of its contract, so the default keeps whatever order the source
/// delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecentOrdersSort {
    /// Take the first orders exactly as the source returned them.
    #[default]
    Source,
    /// Sort by parsed order date, newest first; undated orders go last.
    NewestFirst,
}

impl std::fmt::Display for RecentOrdersSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecentOrdersSort::Source => write!(f, "source"),
            RecentOrdersSort::NewestFirst => write!(f, "newest_first"),
        }
    }
}

impl std::str::FromStr for RecentOrdersSort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "source" => Ok(Self::Source),
            "newest_first" | "newest-first" | "newest" => Ok(Self::NewestFirst),
            _ => Err(CoreError::InvalidValue {
                field: "recent orders sort",
                value: s.to_string(),
            }),
        }
    }
}
