pub mod app_config;
pub mod config;
pub mod numeric;
pub mod orders;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use orders::{Order, RecentOrdersSort};
pub use products::{Product, ACTIVE_STATUS, INACTIVE_STATUS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}
