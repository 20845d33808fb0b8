//! Provider adapter trait and shared helpers

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{error, warn};
use url::Url;

use crate::errors::DeployError;
use crate::http::client::HttpResponse;
use crate::models::deployment::{DeployConfig, DeployResult, Provider};
use crate::models::project::ProjectFiles;

/// Translates the common deploy request into one provider's API.
///
/// Both methods are infallible by signature: every failure is reported
/// in-band as a `DeployResult` with `status: error`.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Provider served by this adapter
    fn provider(&self) -> Provider;

    /// Whether a token is available
    fn is_configured(&self) -> bool;

    /// Ship `files` as a new deployment
    async fn deploy(&self, config: &DeployConfig, files: &ProjectFiles) -> DeployResult;

    /// Fetch the current state of a deployment created by this provider
    async fn get_status(&self, _deployment_id: &str) -> DeployResult {
        DeployResult::from(DeployError::StatusUnsupported(self.provider()))
    }
}

/// Fold an adapter outcome into a result, logging failures
pub(crate) fn settle(provider: Provider, outcome: Result<DeployResult, DeployError>) -> DeployResult {
    match outcome {
        Ok(result) => result,
        Err(e) => {
            match &e {
                DeployError::TokenMissing(_) => warn!("{} deploy skipped: {}", provider, e),
                DeployError::ProviderError(_) => warn!("{} rejected request: {}", provider, e),
                _ => error!("{} request failed: {}", provider, e),
            }
            DeployResult::from(e)
        }
    }
}

/// Expose the token for a request, or fail before any network call
pub(crate) fn require_token(
    provider: Provider,
    token: Option<&SecretString>,
) -> Result<String, DeployError> {
    token
        .map(|t| t.expose_secret().to_string())
        .ok_or(DeployError::TokenMissing(provider))
}

/// Error for a non-2xx response, preferring the provider's own message
pub(crate) fn provider_failure(
    provider: Provider,
    response: &HttpResponse,
    message: Option<String>,
) -> DeployError {
    let message = message.filter(|m| !m.trim().is_empty()).unwrap_or_else(|| {
        format!(
            "{} deployment failed (HTTP {})",
            provider.display_name(),
            response.status.as_u16()
        )
    });
    DeployError::ProviderError(message)
}

/// Build `<base>/<segments..>`.
///
/// Each segment is percent-encoded as a single path segment, so ids cannot
/// change the path, query or fragment of the request.
pub(crate) fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url, DeployError> {
    let mut url = Url::parse(base)
        .map_err(|e| DeployError::ConfigError(format!("Invalid base URL '{}': {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| DeployError::ConfigError(format!("Base URL cannot take a path: '{}'", base)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}
