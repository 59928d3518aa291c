use thiserror::Error;

/// Errors raised while loading probe configuration, catalog files, or
/// scoring tables.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[source] serde_yaml::Error),

    #[error("failed to read scoring file {path}: {source}")]
    ScoringFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scoring file: {0}")]
    ScoringFileParse(#[source] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
