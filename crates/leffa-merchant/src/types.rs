//! Merchant API wire types.
//!
//! Both list endpoints wrap their payload in `{ "success": bool, "data": [...] }`.
//! Items are kept as raw JSON here and parsed one by one by the client, so a
//! single malformed record does not discard the whole list.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiEnvelope {
    /// Best available failure text when `success` is false.
    #[must_use]
    pub fn failure_message(&self) -> String {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or("success flag was false")
            .to_string()
    }
}
