use crate::app_config::{AppConfig, Environment};
use crate::orders::RecentOrdersSort;
use crate::ConfigError;

/// Reads configuration after merging a `.env` file, if one exists, into the
/// process environment.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Reads configuration from the process environment as it stands.
///
/// No `.env` file is consulted; the caller owns the environment.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the real environment so they can
/// be exercised with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let merchant_base_url = require("LEFFA_MERCHANT_BASE_URL")?;
    let merchant_api_token = lookup("LEFFA_MERCHANT_API_TOKEN")
        .ok()
        .filter(|t| !t.is_empty());

    let env = parse_environment(&or_default("LEFFA_ENV", "development"))?;
    let log_level = or_default("LEFFA_LOG_LEVEL", "info");

    let http_timeout_secs = parse_u64("LEFFA_HTTP_TIMEOUT_SECS", "30")?;
    let http_user_agent = or_default("LEFFA_HTTP_USER_AGENT", "leffa/0.1 (merchant-analytics)");
    let http_max_retries = parse_u32("LEFFA_HTTP_MAX_RETRIES", "0")?;
    let http_retry_backoff_base_ms = parse_u64("LEFFA_HTTP_RETRY_BACKOFF_BASE_MS", "500")?;

    let poll_interval_secs = parse_u64("LEFFA_POLL_INTERVAL_SECS", "60")?;
    if poll_interval_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LEFFA_POLL_INTERVAL_SECS".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    let utc_offset = match lookup("LEFFA_UTC_OFFSET_MINUTES") {
        Ok(raw) => parse_utc_offset(&raw)?,
        Err(_) => *chrono::Local::now().offset(),
    };

    let recent_orders_sort = or_default("LEFFA_RECENT_ORDERS_SORT", "source")
        .parse::<RecentOrdersSort>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "LEFFA_RECENT_ORDERS_SORT".to_string(),
            reason: e.to_string(),
        })?;

    Ok(AppConfig {
        merchant_base_url,
        merchant_api_token,
        env,
        log_level,
        http_timeout_secs,
        http_user_agent,
        http_max_retries,
        http_retry_backoff_base_ms,
        poll_interval_secs,
        utc_offset,
        recent_orders_sort,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LEFFA_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Parse a signed minute offset from UTC (e.g. `"330"` for IST) into a
/// [`chrono::FixedOffset`].
fn parse_utc_offset(raw: &str) -> Result<chrono::FixedOffset, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "LEFFA_UTC_OFFSET_MINUTES".to_string(),
        reason,
    };
    let minutes = raw.trim().parse::<i32>().map_err(|e| invalid(e.to_string()))?;
    minutes
        .checked_mul(60)
        .and_then(chrono::FixedOffset::east_opt)
        .ok_or_else(|| invalid(format!("{minutes} minutes is out of range")))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
