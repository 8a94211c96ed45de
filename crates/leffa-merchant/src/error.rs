use thiserror::Error;
use tokio_cron_scheduler::JobSchedulerError;

/// Errors returned by the merchant API client and the poller.
#[derive(Debug, Error)]
pub enum MerchantError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The API answered with `"success": false`.
    #[error("{endpoint} reported failure: {message}")]
    Unsuccessful { endpoint: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid merchant base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("scheduler error: {0}")]
    Scheduler(#[from] JobSchedulerError),
}
