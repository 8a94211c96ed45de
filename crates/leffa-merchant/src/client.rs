//! HTTP client for the merchant API.
//!
//! Wraps `reqwest` with bearer-token auth, the `{ success, data }` envelope
//! check and per-item deserialization. Transient failures go through
//! [`retry_with_backoff`].

use std::time::Duration;

use leffa_core::{AppConfig, Order, Product};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::MerchantError;
use crate::retry::retry_with_backoff;
use crate::types::ApiEnvelope;

pub const ORDERS_PATH: &str = "api/merchant/orders";
pub const PRODUCTS_PATH: &str = "api/merchant/shiprocket/products";

/// Client for the merchant order and inventory endpoints.
///
/// Use [`MerchantClient::new`] with the loaded configuration, or
/// [`MerchantClient::with_base_url`] to point at a mock server in tests.
pub struct MerchantClient {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl MerchantClient {
    /// Builds a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MerchantError::InvalidBaseUrl`] if
    /// `merchant_base_url` is not a valid URL.
    pub fn new(config: &AppConfig) -> Result<Self, MerchantError> {
        let client = Self::with_base_url(
            &config.merchant_base_url,
            config.http_timeout_secs,
            &config.http_user_agent,
        )?
        .with_retries(config.http_max_retries, config.http_retry_backoff_base_ms);

        Ok(match &config.merchant_api_token {
            Some(token) => client.with_api_token(token),
            None => client,
        })
    }

    /// Creates a client with a custom base URL and no retries.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MerchantError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, MerchantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joining a relative path appends to
        // any path prefix instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| MerchantError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(MerchantError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            api_token: None,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub fn with_api_token(mut self, token: &str) -> Self {
        self.api_token = Some(token.to_owned());
        self
    }

    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetches the merchant's orders.
    ///
    /// # Errors
    ///
    /// - [`MerchantError::Http`] on network failure after all retries.
    /// - [`MerchantError::UnexpectedStatus`] on a non-2xx status.
    /// - [`MerchantError::Unsuccessful`] when the envelope says `"success": false`.
    /// - [`MerchantError::Deserialize`] if the body is not a valid envelope.
    pub async fn fetch_orders(&self) -> Result<Vec<Order>, MerchantError> {
        self.fetch_list(ORDERS_PATH).await
    }

    /// Fetches the merchant's raw inventory, placeholders included.
    ///
    /// # Errors
    ///
    /// Same as [`MerchantClient::fetch_orders`].
    pub async fn fetch_products(&self) -> Result<Vec<Product>, MerchantError> {
        self.fetch_list(PRODUCTS_PATH).await
    }

    /// Fetches one list endpoint and parses its `data` array item by item.
    ///
    /// A `null` or missing `data` is an empty list. Items that fail to
    /// deserialize are skipped with a warning.
    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, MerchantError> {
        let url = self.endpoint(path)?;
        let envelope = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move { self.request_envelope(url, path).await }
        })
        .await?;

        if !envelope.success {
            return Err(MerchantError::Unsuccessful {
                endpoint: path.to_owned(),
                message: envelope.failure_message(),
            });
        }

        let raw: Vec<Value> = if envelope.data.is_null() {
            Vec::new()
        } else {
            serde_json::from_value(envelope.data).map_err(|e| MerchantError::Deserialize {
                context: format!("{path} data"),
                source: e,
            })?
        };

        let total = raw.len();
        let items: Vec<T> = raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(endpoint = path, index, error = %e, "skipping malformed item");
                    None
                }
            })
            .collect();

        tracing::debug!(endpoint = path, total, parsed = items.len(), "fetched merchant list");
        Ok(items)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body as
    /// an [`ApiEnvelope`].
    async fn request_envelope(&self, url: Url, path: &str) -> Result<ApiEnvelope, MerchantError> {
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MerchantError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| MerchantError::Deserialize {
            context: format!("{path} response"),
            source: e,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, MerchantError> {
        self.base_url
            .join(path)
            .map_err(|e| MerchantError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
