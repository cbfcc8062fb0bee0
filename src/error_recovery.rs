// src/error_recovery.rs
//! Retry with exponential backoff for errors the wiki says are transient.
//!
//! The navigator itself never retries. Callers that want to ride out a
//! lagging server wrap an operation in [`retry_with_backoff`].

use crate::error::WikiError;
use std::time::Duration;

/// Retries an async operation while it fails with a retryable error.
///
/// Any other error is returned immediately, as is the last retryable one
/// once `max_attempts` is reached.
pub async fn retry_with_backoff<F, T, Fut>(
    mut operation: F,
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
) -> Result<T, WikiError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, WikiError>>,
{
    let mut delay = initial_delay;
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                log::warn!(
                    "Attempt {} failed ({}), retrying after {:?}",
                    attempt,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, max_delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
