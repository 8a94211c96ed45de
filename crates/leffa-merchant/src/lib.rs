//! Merchant API access and the analytics entry points built on it.

pub mod client;
pub mod error;
pub mod poller;
pub(crate) mod retry;
pub mod service;
pub mod types;

pub use client::MerchantClient;
pub use error::MerchantError;
pub use poller::{subscribe_to_analytics_updates, Subscription, UpdateCallback};
pub use service::MerchantAnalytics;
