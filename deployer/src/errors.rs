//! Error types for the deployer

use thiserror::Error;

use crate::models::deployment::Provider;

/// Internal error type.
///
/// Never crosses the [`DeployService`](crate::deploy::service::DeployService)
/// boundary: the facade folds every variant into a failed `DeployResult`.
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    #[error("{} token not configured", .0.display_name())]
    TokenMissing(Provider),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(Provider),

    #[error("Status check not implemented for this provider")]
    StatusUnsupported(Provider),

    /// Failure reported by the provider itself, message taken from its payload
    #[error("{0}")]
    ProviderError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for DeployError {
    fn from(err: anyhow::Error) -> Self {
        DeployError::Internal(err.to_string())
    }
}
