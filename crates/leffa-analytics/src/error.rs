use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("unknown granularity \"{0}\" (expected daily, weekly, monthly or yearly)")]
    UnknownGranularity(String),
}
