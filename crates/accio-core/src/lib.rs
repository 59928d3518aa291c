//! Domain core for cross-platform handle correlation.
//!
//! Turns a person's name into candidate handles, describes the platforms to
//! probe, and scores probe results into ranked profile matches. Everything
//! here is pure; the network side lives in `accio-probe`.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod names;
pub mod probe_config;
pub mod results;
pub mod scoring;

pub use analysis::{
    analyze_results, analyze_results_with, find_common_profiles, find_common_profiles_with,
    find_profiles_by_platforms, AnalysisResult, ProfileMatch,
};
pub use catalog::{
    load_catalog, load_catalog_or_builtin, Catalog, CatalogEntry, ExistenceCorrection,
};
pub use config::{load_probe_config, load_probe_config_from_env};
pub use error::ConfigError;
pub use names::{to_leetspeak, NameInfo, UsernameTier};
pub use probe_config::ProbeConfig;
pub use results::{CandidateResults, ProbeResult};
pub use scoring::{load_scoring, load_scoring_or_default, PlatformWeight, ScoringConfig};
