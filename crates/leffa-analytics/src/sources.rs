//! Per-source fetch outcome.
//!
//! A failed fetch still yields a complete result built from an empty
//! collection. The failure is carried next to the data so callers can tell
//! "no orders" from "orders endpoint down".

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SourceStatus {
    Ok { count: usize },
    Failed { reason: String },
}

impl SourceStatus {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, SourceStatus::Failed { .. })
    }
}

/// Items from one source plus how the fetch went.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub items: Vec<T>,
    pub status: SourceStatus,
}

impl<T> Fetched<T> {
    #[must_use]
    pub fn ok(items: Vec<T>) -> Self {
        let status = SourceStatus::Ok { count: items.len() };
        Self { items, status }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            status: SourceStatus::Failed {
                reason: reason.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceHealth {
    pub orders: SourceStatus,
    pub products: SourceStatus,
}

impl SourceHealth {
    /// `true` when at least one source failed.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.orders.is_failed() || self.products.is_failed()
    }
}
