//! Heuristic confidence that a candidate's hits belong to one person.
//!
//! The score is a base value from the hit count plus per-platform bonuses for
//! platforms that are strong identity signals:
//!
//! | Hits | Base                              |
//! |------|-----------------------------------|
//! | 1    | 0.10                              |
//! | 2    | 0.30                              |
//! | 3    | 0.50                              |
//! | ≥ 4  | 0.70 + 0.05 × (hits − 4), max 0.90 |
//!
//! Bonuses are added in result order and the running value is clamped to
//! 1.00 after every addition.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::results::ProbeResult;
use crate::ConfigError;

const BASE_CEILING: f64 = 0.9;
const CONFIDENCE_CEILING: f64 = 1.0;

/// Bonus granted when a candidate is found on `platform_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformWeight {
    pub platform_name: String,
    pub bonus: f64,
}

impl PlatformWeight {
    #[must_use]
    pub fn new(platform_name: &str, bonus: f64) -> Self {
        Self {
            platform_name: platform_name.to_owned(),
            bonus,
        }
    }
}

fn default_high_value_platforms() -> Vec<PlatformWeight> {
    vec![
        PlatformWeight::new("GitHub", 0.1),
        PlatformWeight::new("Twitter", 0.1),
        PlatformWeight::new("LinkedIn", 0.15),
        PlatformWeight::new("Facebook", 0.1),
        PlatformWeight::new("Instagram", 0.1),
    ]
}

fn default_unique_threshold() -> f64 {
    0.7
}

/// Weights consumed by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_high_value_platforms")]
    pub high_value_platforms: Vec<PlatformWeight>,
    /// Matches at or above this confidence count as likely unique profiles.
    #[serde(default = "default_unique_threshold")]
    pub unique_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            high_value_platforms: default_high_value_platforms(),
            unique_threshold: default_unique_threshold(),
        }
    }
}

impl ScoringConfig {
    /// Bonus for `platform_name`. Names match exactly, as probe results carry
    /// catalog names verbatim.
    #[must_use]
    pub fn bonus_for(&self, platform_name: &str) -> Option<f64> {
        self.high_value_platforms
            .iter()
            .find(|w| w.platform_name == platform_name)
            .map(|w| w.bonus)
    }

    #[must_use]
    pub fn is_high_value(&self, platform_name: &str) -> bool {
        self.bonus_for(platform_name).is_some()
    }
}

/// Base confidence from the number of platforms a candidate was found on.
///
/// Zero hits score zero; the aggregator never scores such candidates.
#[must_use]
pub fn base_confidence(match_count: usize) -> f64 {
    match match_count {
        0 => 0.0,
        1 => 0.1,
        2 => 0.3,
        3 => 0.5,
        n => {
            #[allow(clippy::cast_precision_loss)]
            let extra = (n - 4) as f64;
            (0.7 + extra * 0.05).min(BASE_CEILING)
        }
    }
}

/// Score a candidate's found results (all `exists == true`), in order.
#[must_use]
pub fn confidence(found: &[ProbeResult], config: &ScoringConfig) -> f64 {
    let mut confidence = base_confidence(found.len());
    for result in found {
        if let Some(bonus) = config.bonus_for(&result.platform_name) {
            confidence = (confidence + bonus).min(CONFIDENCE_CEILING);
        }
    }
    confidence
}

/// Load and validate a scoring table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_scoring(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ScoringFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: ScoringConfig =
        serde_yaml::from_str(&content).map_err(ConfigError::ScoringFileParse)?;

    validate_scoring(&config)?;

    Ok(config)
}

/// Load the scoring table at `path`, or fall back to the default weights.
///
/// # Errors
///
/// Propagates [`load_scoring`] errors when a path is given.
pub fn load_scoring_or_default(path: Option<&Path>) -> Result<ScoringConfig, ConfigError> {
    match path {
        Some(p) => load_scoring(p),
        None => Ok(ScoringConfig::default()),
    }
}

fn validate_scoring(config: &ScoringConfig) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&config.unique_threshold) {
        return Err(ConfigError::Validation(format!(
            "unique_threshold {} must be within [0, 1]",
            config.unique_threshold
        )));
    }

    let mut seen = HashSet::new();
    for weight in &config.high_value_platforms {
        if weight.platform_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "high-value platform name must be non-empty".to_string(),
            ));
        }
        if !weight.bonus.is_finite() || weight.bonus < 0.0 {
            return Err(ConfigError::Validation(format!(
                "platform '{}' has invalid bonus {}; must be a non-negative number",
                weight.platform_name, weight.bonus
            )));
        }
        if !seen.insert(weight.platform_name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate high-value platform: '{}'",
                weight.platform_name
            )));
        }
    }

    Ok(())
}
