//! Linear-backoff retry for single probes.
//!
//! A probe that gets any HTTP answer (found or not) is done; only transport
//! failures and timeouts are retried. Non-retriable errors are returned
//! immediately without sleeping.

use std::future::Future;
use std::time::Duration;

use crate::error::ProbeError;

/// Runs `operation` up to `max_attempts` times, sleeping `n × step` before
/// attempt `n` (0-based).
///
/// # Backoff schedule (example with `step = 500ms`)
///
/// | Attempt | Sleep before attempt |
/// |---------|----------------------|
/// | 0       | none                 |
/// | 1       | 500 ms               |
/// | 2       | 1 000 ms             |
///
/// `max_attempts = 0` is treated as a single attempt.
///
/// # Errors
///
/// Returns non-retriable errors as-is. When every attempt fails with a
/// retriable error, returns [`ProbeError::RetriesExhausted`] wrapping the
/// last one.
pub async fn retry_linear<T, F, Fut>(
    max_attempts: u32,
    step: Duration,
    mut operation: F,
) -> Result<T, ProbeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProbeError>>,
{
    let attempts = max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        let delay = step.saturating_mul(attempt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retriable() {
                    return Err(err);
                }
                attempt += 1;
                if attempt >= attempts {
                    return Err(ProbeError::RetriesExhausted {
                        attempts,
                        source: Box::new(err),
                    });
                }
                let delay_ms =
                    u64::try_from(step.saturating_mul(attempt).as_millis()).unwrap_or(u64::MAX);
                tracing::warn!(
                    attempt,
                    max_attempts = attempts,
                    delay_ms,
                    error = %err,
                    "probe attempt failed, retrying after backoff"
                );
            }
        }
    }
}
