use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("LEFFA_MERCHANT_BASE_URL", "http://localhost:3000");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "LEFFA_ENV"));
}

#[test]
fn build_app_config_fails_without_base_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "LEFFA_MERCHANT_BASE_URL"),
        "expected MissingEnvVar(LEFFA_MERCHANT_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_base_url_as_missing() {
    let mut map = HashMap::new();
    map.insert("LEFFA_MERCHANT_BASE_URL", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.merchant_base_url, "http://localhost:3000");
    assert!(cfg.merchant_api_token.is_none());
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.http_timeout_secs, 30);
    assert_eq!(cfg.http_user_agent, "leffa/0.1 (merchant-analytics)");
    assert_eq!(cfg.http_max_retries, 0);
    assert_eq!(cfg.http_retry_backoff_base_ms, 500);
    assert_eq!(cfg.poll_interval_secs, 60);
    assert_eq!(cfg.recent_orders_sort, RecentOrdersSort::Source);
}

#[test]
fn api_token_is_redacted_in_debug_output() {
    let mut map = full_env();
    map.insert("LEFFA_MERCHANT_API_TOKEN", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn http_timeout_override() {
    let mut map = full_env();
    map.insert("LEFFA_HTTP_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.http_timeout_secs, 5);
}

#[test]
fn http_timeout_invalid() {
    let mut map = full_env();
    map.insert("LEFFA_HTTP_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEFFA_HTTP_TIMEOUT_SECS"),
        "expected InvalidEnvVar(LEFFA_HTTP_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn max_retries_invalid() {
    let mut map = full_env();
    map.insert("LEFFA_HTTP_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEFFA_HTTP_MAX_RETRIES")
    );
}

#[test]
fn poll_interval_zero_is_rejected() {
    let mut map = full_env();
    map.insert("LEFFA_POLL_INTERVAL_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEFFA_POLL_INTERVAL_SECS")
    );
}

#[test]
fn utc_offset_minutes_override() {
    let mut map = full_env();
    map.insert("LEFFA_UTC_OFFSET_MINUTES", "330");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.utc_offset.local_minus_utc(), 330 * 60);
}

#[test]
fn utc_offset_negative_minutes() {
    let mut map = full_env();
    map.insert("LEFFA_UTC_OFFSET_MINUTES", "-300");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.utc_offset.local_minus_utc(), -300 * 60);
}

#[test]
fn utc_offset_out_of_range() {
    let mut map = full_env();
    map.insert("LEFFA_UTC_OFFSET_MINUTES", "100000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEFFA_UTC_OFFSET_MINUTES")
    );
}

#[test]
fn recent_orders_sort_newest_first() {
    let mut map = full_env();
    map.insert("LEFFA_RECENT_ORDERS_SORT", "newest_first");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.recent_orders_sort, RecentOrdersSort::NewestFirst);
}

#[test]
fn recent_orders_sort_invalid() {
    let mut map = full_env();
    map.insert("LEFFA_RECENT_ORDERS_SORT", "random");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEFFA_RECENT_ORDERS_SORT")
    );
}
