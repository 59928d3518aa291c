use std::path::PathBuf;
use std::time::Duration;

/// Default `User-Agent` sent with every probe.
pub const DEFAULT_USER_AGENT: &str = "Accio/1.0";

/// Settings for the probe engine and search fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Deadline for a single probe attempt, including redirects.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Total attempts per (candidate, platform) pair; `0` behaves as `1`.
    pub max_retries: u32,
    /// Linear backoff step: attempt `n` waits `n × backoff_step_ms` first.
    pub backoff_step_ms: u64,
    /// Upper bound on concurrently in-flight probes during a search.
    pub max_concurrent_probes: usize,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout_secs: u64,
    pub user_agent: String,
    /// YAML catalog to use instead of the builtin platform table.
    pub catalog_path: Option<PathBuf>,
    /// YAML scoring table to use instead of the default weights.
    pub scoring_path: Option<PathBuf>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 5,
            max_retries: 3,
            backoff_step_ms: 500,
            max_concurrent_probes: 64,
            pool_max_idle_per_host: 100,
            pool_idle_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            catalog_path: None,
            scoring_path: None,
        }
    }
}

impl ProbeConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[must_use]
    pub fn backoff_step(&self) -> Duration {
        Duration::from_millis(self.backoff_step_ms)
    }

    #[must_use]
    pub fn pool_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_idle_timeout_secs)
    }
}
