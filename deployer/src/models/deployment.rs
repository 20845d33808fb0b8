//! Deployment models

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DeployError;

/// Supported hosting providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Vercel,
    Netlify,
    Railway,
    Render,
}

impl Provider {
    /// All providers, in the order they are reported to callers
    pub const ALL: [Provider; 4] = [
        Provider::Vercel,
        Provider::Netlify,
        Provider::Railway,
        Provider::Render,
    ];

    /// Wire tag, e.g. `vercel`
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Vercel => "vercel",
            Provider::Netlify => "netlify",
            Provider::Railway => "railway",
            Provider::Render => "render",
        }
    }

    /// Human readable name used in error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Vercel => "Vercel",
            Provider::Netlify => "Netlify",
            Provider::Railway => "Railway",
            Provider::Render => "Render",
        }
    }

    /// Environment variable holding the provider's bearer token
    pub fn token_env_var(&self) -> &'static str {
        match self {
            Provider::Vercel => "VERCEL_TOKEN",
            Provider::Netlify => "NETLIFY_AUTH_TOKEN",
            Provider::Railway => "RAILWAY_TOKEN",
            Provider::Render => "RENDER_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vercel" => Ok(Provider::Vercel),
            "netlify" => Ok(Provider::Netlify),
            "railway" => Ok(Provider::Railway),
            "render" => Ok(Provider::Render),
            _ => Err(DeployError::UnknownProvider(s.to_string())),
        }
    }
}

/// Deployment status, common to all providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployStatus {
    Queued,
    Building,
    Ready,
    Error,
    Cancelled,
}

impl DeployStatus {
    /// No further transition is expected without a new deploy
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeployStatus::Ready | DeployStatus::Error | DeployStatus::Cancelled
        )
    }
}

impl fmt::Display for DeployStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeployStatus::Queued => "queued",
            DeployStatus::Building => "building",
            DeployStatus::Ready => "ready",
            DeployStatus::Error => "error",
            DeployStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Deployment request, built fresh for every deploy call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployConfig {
    /// Target provider
    pub provider: Provider,

    /// Project (site, service) name on the provider
    pub project_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_command: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment_variables: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,
}

impl DeployConfig {
    /// Create a config with only the required fields set
    pub fn new(provider: Provider, project_name: impl Into<String>) -> Self {
        Self {
            provider,
            project_name: project_name.into(),
            framework: None,
            build_command: None,
            output_directory: None,
            install_command: None,
            environment_variables: BTreeMap::new(),
            regions: Vec::new(),
        }
    }
}

/// Outcome of a deploy or status call.
///
/// `success` is true exactly when `status` is `Ready`, and `error` is set
/// exactly when `status` is `Error`. The constructors keep both in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployResult {
    pub success: bool,

    /// Provider-scoped deployment id, only valid for the same provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,

    pub status: DeployStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Build log lines. None of the create or status endpoints return
    /// them, so adapters leave this unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<String>>,

    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_at: Option<DateTime<Utc>>,
}

/// Used when a provider reports an error state without a message
pub const DEFAULT_FAILURE_MESSAGE: &str = "Deployment failed";

impl DeployResult {
    /// Result in the given status. An `Error` status gets `error_message`,
    /// falling back to a generic message; other statuses drop it.
    pub fn new(status: DeployStatus, error_message: Option<String>) -> Self {
        let error = match status {
            DeployStatus::Error => {
                Some(error_message.unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()))
            }
            _ => None,
        };

        Self {
            success: status == DeployStatus::Ready,
            deployment_id: None,
            url: None,
            preview_url: None,
            status,
            error,
            logs: None,
            created_at: Utc::now(),
            ready_at: None,
        }
    }

    /// Failed result carrying `message`
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(DeployStatus::Error, Some(message.into()))
    }

    pub fn with_deployment_id(mut self, id: impl Into<String>) -> Self {
        self.deployment_id = Some(id.into());
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn with_preview_url(mut self, url: Option<String>) -> Self {
        self.preview_url = url;
        self
    }

    pub fn with_created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        if let Some(created_at) = created_at {
            self.created_at = created_at;
        }
        self
    }

    /// Only recorded for ready deployments
    pub fn with_ready_at(mut self, ready_at: Option<DateTime<Utc>>) -> Self {
        if self.status == DeployStatus::Ready {
            self.ready_at = ready_at;
        }
        self
    }
}

impl From<&DeployError> for DeployResult {
    fn from(err: &DeployError) -> Self {
        DeployResult::failure(err.to_string())
    }
}

impl From<DeployError> for DeployResult {
    fn from(err: DeployError) -> Self {
        DeployResult::from(&err)
    }
}

/// Prefix `https://` onto a bare hostname
pub fn ensure_https(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
