use serde::{Deserialize, Serialize};

/// Final outcome of probing one candidate on one platform, after retries.
///
/// Build it through [`ProbeResult::found`], [`ProbeResult::not_found`] or
/// [`ProbeResult::failed`]; a failed probe never reports `exists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub platform_name: String,
    pub url: String,
    pub exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    #[must_use]
    pub fn found(platform_name: &str, url: &str) -> Self {
        Self::resolved(platform_name, url, true)
    }

    #[must_use]
    pub fn not_found(platform_name: &str, url: &str) -> Self {
        Self::resolved(platform_name, url, false)
    }

    #[must_use]
    pub fn resolved(platform_name: &str, url: &str, exists: bool) -> Self {
        Self {
            platform_name: platform_name.to_owned(),
            url: url.to_owned(),
            exists,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(platform_name: &str, url: &str, error: impl Into<String>) -> Self {
        Self {
            platform_name: platform_name.to_owned(),
            url: url.to_owned(),
            exists: false,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Every probe result gathered for one candidate handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateResults {
    pub candidate: String,
    pub results: Vec<ProbeResult>,
}

impl CandidateResults {
    #[must_use]
    pub fn new(candidate: &str, results: Vec<ProbeResult>) -> Self {
        Self {
            candidate: candidate.to_owned(),
            results,
        }
    }
}
