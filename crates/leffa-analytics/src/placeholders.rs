//! Stand-ins for metrics the platform does not record yet.
//!
//! There is no per-product sales history and no merchant inbox, but the
//! dashboard contract still carries `sales`, `revenue` and `unreadMessages`.
//! The values come from a [`PlaceholderMetrics`] implementation so a real
//! source can replace [`RandomPlaceholders`] without touching the
//! aggregation code.

use leffa_core::Product;
use rand::Rng;

/// Synthetic per-product sales figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSalesEstimate {
    pub sales: u32,
    pub revenue: u32,
}

pub trait PlaceholderMetrics: Send + Sync {
    /// Units sold and revenue for `product`.
    fn product_sales(&self, product: &Product) -> ProductSalesEstimate;

    /// Unread merchant messages.
    fn unread_messages(&self) -> u32;
}

/// Random values in the ranges the dashboard mock has always shown:
/// sales 20–119, revenue 1000–5999, unread messages 0–9.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlaceholders;

impl PlaceholderMetrics for RandomPlaceholders {
    fn product_sales(&self, _product: &Product) -> ProductSalesEstimate {
        let mut rng = rand::rng();
        ProductSalesEstimate {
            sales: rng.random_range(20..120),
            revenue: rng.random_range(1000..6000),
        }
    }

    fn unread_messages(&self) -> u32 {
        rand::rng().random_range(0..10)
    }
}

/// Constant values, for reproducible output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedPlaceholders {
    pub sales: u32,
    pub revenue: u32,
    pub unread_messages: u32,
}

impl PlaceholderMetrics for FixedPlaceholders {
    fn product_sales(&self, _product: &Product) -> ProductSalesEstimate {
        ProductSalesEstimate {
            sales: self.sales,
            revenue: self.revenue,
        }
    }

    fn unread_messages(&self) -> u32 {
        self.unread_messages
    }
}
