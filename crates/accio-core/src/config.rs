use std::path::PathBuf;
use std::str::FromStr;

use crate::probe_config::{ProbeConfig, DEFAULT_USER_AGENT};
use crate::ConfigError;

/// Load probe configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_probe_config() -> Result<ProbeConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_probe_config_from_env()
}

/// Load probe configuration from environment variables already in the process.
///
/// Unlike [`load_probe_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_probe_config_from_env() -> Result<ProbeConfig, ConfigError> {
    build_probe_config(|key| std::env::var(key))
}

/// Build probe configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables take the [`ProbeConfig`]
/// defaults.
fn build_probe_config<F>(lookup: F) -> Result<ProbeConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = ProbeConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional_path = |var: &str| -> Option<PathBuf> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    };

    let timeout_secs = parse_var(&lookup, "ACCIO_PROBE_TIMEOUT_SECS", defaults.timeout_secs)?;
    let connect_timeout_secs = parse_var(
        &lookup,
        "ACCIO_PROBE_CONNECT_TIMEOUT_SECS",
        defaults.connect_timeout_secs,
    )?;
    let max_retries = parse_var(&lookup, "ACCIO_PROBE_MAX_RETRIES", defaults.max_retries)?;
    let backoff_step_ms = parse_var(
        &lookup,
        "ACCIO_PROBE_BACKOFF_STEP_MS",
        defaults.backoff_step_ms,
    )?;
    let max_concurrent_probes = parse_var(
        &lookup,
        "ACCIO_PROBE_MAX_CONCURRENT",
        defaults.max_concurrent_probes,
    )?;
    let pool_max_idle_per_host = parse_var(
        &lookup,
        "ACCIO_POOL_MAX_IDLE_PER_HOST",
        defaults.pool_max_idle_per_host,
    )?;
    let pool_idle_timeout_secs = parse_var(
        &lookup,
        "ACCIO_POOL_IDLE_TIMEOUT_SECS",
        defaults.pool_idle_timeout_secs,
    )?;

    if timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ACCIO_PROBE_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    if max_concurrent_probes == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ACCIO_PROBE_MAX_CONCURRENT".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let user_agent = or_default("ACCIO_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(ProbeConfig {
        timeout_secs,
        connect_timeout_secs,
        max_retries,
        backoff_step_ms,
        max_concurrent_probes,
        pool_max_idle_per_host,
        pool_idle_timeout_secs,
        user_agent,
        catalog_path: optional_path("ACCIO_CATALOG_PATH"),
        scoring_path: optional_path("ACCIO_SCORING_PATH"),
    })
}

/// Parse `var` if set, otherwise return `default`.
fn parse_var<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
