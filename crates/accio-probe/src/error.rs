use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("probe of {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("unsupported check method \"{method}\" for platform {platform}")]
    UnsupportedMethod { platform: String, method: String },

    #[error("max retries exceeded after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<ProbeError>,
    },

    #[error("configuration error: {0}")]
    Config(#[from] accio_core::ConfigError),
}

impl ProbeError {
    /// Transport-level failures are worth another attempt; everything else
    /// would fail the same way again.
    ///
    /// A request that reqwest could not build (e.g. a handle that makes an
    /// invalid host) is not a transport failure.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        match self {
            ProbeError::Http(e) => !e.is_builder(),
            ProbeError::Timeout { .. } => true,
            _ => false,
        }
    }
}
