//! HTTP existence probes against catalog platforms.

use std::sync::Arc;
use std::time::Duration;

use accio_core::{CatalogEntry, ProbeConfig, ProbeResult};
use reqwest::{Client, Method};

use crate::error::ProbeError;
use crate::retry::retry_linear;
use crate::stats::{ProbeOutcome, StatsRecorder};

/// Existence checker for candidate handles.
///
/// One `reqwest` connection pool is shared by every probe made through this
/// client and its [`sessions`](ProbeClient::new_session). A profile "exists"
/// when the platform answers with a 2xx status, subject to the catalog
/// entry's existence correction. Clean non-2xx answers are "not found";
/// only transport failures and timeouts are errors.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    client: Client,
    stats: Arc<StatsRecorder>,
    timeout: Duration,
    /// Total attempts per (candidate, platform) pair.
    max_retries: u32,
    backoff_step: Duration,
}

impl ProbeClient {
    /// Creates a `ProbeClient` with pool limits, `User-Agent`, timeout and
    /// retry policy from `config`, and a fresh statistics session.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout())
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            stats: Arc::new(StatsRecorder::new()),
            timeout: config.timeout(),
            max_retries: config.max_retries,
            backoff_step: config.backoff_step(),
        })
    }

    /// A client sharing this one's connection pool and retry policy but
    /// counting into a fresh statistics session.
    #[must_use]
    pub fn new_session(&self) -> Self {
        Self {
            stats: Arc::new(StatsRecorder::new()),
            ..self.clone()
        }
    }

    /// The statistics session every probe through this client counts into.
    #[must_use]
    pub fn stats(&self) -> &Arc<StatsRecorder> {
        &self.stats
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Make one bounded-time existence check of `candidate` on `entry`.
    ///
    /// Every call counts exactly one found, not-found or error outcome.
    ///
    /// # Errors
    ///
    /// - [`ProbeError::Http`] on network or protocol failure.
    /// - [`ProbeError::Timeout`] if the exchange (including draining a small
    ///   body) does not finish within `timeout`.
    /// - [`ProbeError::UnsupportedMethod`] if the entry's method is not GET or HEAD.
    pub async fn probe(
        &self,
        candidate: &str,
        entry: &CatalogEntry,
        timeout: Duration,
    ) -> Result<bool, ProbeError> {
        let url = entry.profile_url(candidate);
        tracing::debug!(candidate, platform = %entry.platform_name, %url, "probing");

        let outcome = self.send_probe(candidate, entry, &url, timeout).await;

        let bucket = match &outcome {
            Ok(true) => ProbeOutcome::Found,
            Ok(false) => ProbeOutcome::NotFound,
            Err(_) => ProbeOutcome::Error,
        };
        self.stats.record(bucket).await;

        outcome
    }

    /// [`probe`](Self::probe) with linear backoff between failed attempts.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::RetriesExhausted`] if every attempt failed with a
    /// transport error, or a non-retriable error immediately.
    pub async fn probe_with_retry(
        &self,
        candidate: &str,
        entry: &CatalogEntry,
    ) -> Result<bool, ProbeError> {
        retry_linear(self.max_retries, self.backoff_step, || {
            self.probe(candidate, entry, self.timeout)
        })
        .await
    }

    /// Probe with retries and fold the outcome into a [`ProbeResult`].
    ///
    /// Exhausted retries become a failed result rather than an error so one
    /// bad pair never aborts its siblings.
    pub async fn probe_result(&self, candidate: &str, entry: &CatalogEntry) -> ProbeResult {
        let url = entry.profile_url(candidate);
        match self.probe_with_retry(candidate, entry).await {
            Ok(exists) => ProbeResult::resolved(&entry.platform_name, &url, exists),
            Err(e) => {
                tracing::warn!(
                    candidate,
                    platform = %entry.platform_name,
                    error = %e,
                    "probe failed"
                );
                ProbeResult::failed(&entry.platform_name, &url, e.to_string())
            }
        }
    }

    async fn send_probe(
        &self,
        candidate: &str,
        entry: &CatalogEntry,
        url: &str,
        timeout: Duration,
    ) -> Result<bool, ProbeError> {
        let method = check_method(entry)?;
        let exchange = async {
            let response = self.client.request(method, url).send().await?;
            let exists = response.status().is_success();
            let resolved = response.url().to_string();
            drain_small_body(response).await;
            Ok::<_, ProbeError>((exists, resolved))
        };

        let (exists, resolved) = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| ProbeError::Timeout {
                url: url.to_owned(),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            })??;

        let refined = entry.refine_existence(candidate, &resolved, exists);

        if exists && !refined {
            tracing::debug!(
                candidate,
                platform = %entry.platform_name,
                %resolved,
                "existence corrected to not-found"
            );
        }

        Ok(refined)
    }
}

/// Bodies up to this size are read to the end so the connection can go back
/// to the pool. Larger or unsized bodies are dropped and the connection closed.
const DRAIN_LIMIT_BYTES: u64 = 64 * 1024;

fn should_drain(content_length: Option<u64>) -> bool {
    content_length.is_some_and(|len| len <= DRAIN_LIMIT_BYTES)
}

async fn drain_small_body(response: reqwest::Response) {
    if should_drain(response.content_length()) {
        // The verdict is already decided; a failed drain only costs the connection.
        let _ = response.bytes().await;
    }
}

fn check_method(entry: &CatalogEntry) -> Result<Method, ProbeError> {
    match entry.check_method.to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "HEAD" => Ok(Method::HEAD),
        _ => Err(ProbeError::UnsupportedMethod {
            platform: entry.platform_name.clone(),
            method: entry.check_method.clone(),
        }),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
