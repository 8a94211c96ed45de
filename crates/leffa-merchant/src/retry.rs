//! Retry with exponential back-off and jitter for the merchant API client.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors (network failures, 429, 5xx). Everything else is returned
//! on the first attempt.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::MerchantError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** timeouts, connection failures, HTTP 429 and 5xx.
///
/// **Not retriable:** any other status, `"success": false` envelopes,
/// malformed bodies, configuration and scheduler errors.
pub(crate) fn is_retriable(err: &MerchantError) -> bool {
    match err {
        MerchantError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        MerchantError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        MerchantError::Unsuccessful { .. }
        | MerchantError::Deserialize { .. }
        | MerchantError::InvalidBaseUrl { .. }
        | MerchantError::Scheduler(_) => false,
    }
}

/// Longest pause between two attempts.
const MAX_DELAY_MS: u64 = 30_000;

/// Pause before retry number `attempt` (1-based): `backoff_base_ms` doubled
/// per earlier retry, capped at [`MAX_DELAY_MS`], then jittered by up to a
/// quarter either way.
fn backoff_delay(backoff_base_ms: u64, attempt: u32) -> Duration {
    let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
    let nominal = backoff_base_ms.saturating_mul(factor).min(MAX_DELAY_MS);
    let spread = nominal / 4;
    Duration::from_millis(rand::rng().random_range(nominal - spread..=nominal + spread))
}

/// Calls `operation` until it succeeds, fails with a non-transient error, or
/// has been retried `max_retries` times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, MerchantError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MerchantError>>,
{
    let mut retries_used = 0u32;
    let err = loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if retries_used == max_retries || !is_retriable(&err) {
            break err;
        }
        retries_used += 1;

        let delay = backoff_delay(backoff_base_ms, retries_used);
        tracing::warn!(
            attempt = retries_used,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "merchant API call failed; backing off before retrying"
        );
        tokio::time::sleep(delay).await;
    };
    Err(err)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn status(status: u16) -> MerchantError {
        MerchantError::UnexpectedStatus {
            status,
            url: "http://merchant.test/api/merchant/orders".to_owned(),
        }
    }

    #[test]
    fn server_errors_and_throttling_are_retriable() {
        assert!(is_retriable(&status(503)));
        assert!(is_retriable(&status(429)));
        assert!(!is_retriable(&status(404)));
        assert!(!is_retriable(&status(401)));
    }

    #[test]
    fn envelope_and_body_errors_are_not_retriable() {
        assert!(!is_retriable(&MerchantError::Unsuccessful {
            endpoint: "api/merchant/orders".to_owned(),
            message: "not signed in".to_owned(),
        }));
        let source = serde_json::from_str::<()>("invalid").unwrap_err();
        assert!(!is_retriable(&MerchantError::Deserialize {
            context: "test".to_owned(),
            source,
        }));
    }

    #[test]
    fn backoff_doubles_within_jitter_and_caps() {
        for _ in 0..50 {
            let first = backoff_delay(200, 1).as_millis();
            assert!((150..=250).contains(&first), "first delay {first}");
            let third = backoff_delay(200, 3).as_millis();
            assert!((600..=1_000).contains(&third), "third delay {third}");
            let late = backoff_delay(200, 40).as_millis();
            assert!((22_500..=37_500).contains(&late), "capped delay {late}");
        }
        assert_eq!(backoff_delay(0, 5), Duration::ZERO);
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, MerchantError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err(status(502))
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(status(500))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(
            result,
            Err(MerchantError::UnexpectedStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(status(403))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "4xx must not be retried");
        assert!(result.is_err());
    }
}
