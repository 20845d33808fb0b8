//! Vercel REST models (`/v13/deployments`)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// File shipped inline in a deployment request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineFile {
    /// Path relative to the project root
    pub file: String,

    /// File contents
    pub data: String,

    /// Either `base64` or `utf-8`
    pub encoding: String,
}

/// Build settings applied to the project on first deployment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_command: Option<String>,
}

impl ProjectSettings {
    pub fn is_empty(&self) -> bool {
        self.framework.is_none()
            && self.build_command.is_none()
            && self.output_directory.is_none()
            && self.install_command.is_none()
    }
}

/// Create deployment request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeploymentRequest {
    pub name: String,

    pub files: Vec<InlineFile>,

    #[serde(default, skip_serializing_if = "ProjectSettings::is_empty")]
    pub project_settings: ProjectSettings,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,

    /// Always `production` for deployments created by the facade
    pub target: String,
}

/// Deployment as returned by create and get
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: String,

    /// Hostname without scheme, e.g. `demo-abc.vercel.app`
    #[serde(default)]
    pub url: Option<String>,

    /// `QUEUED`, `INITIALIZING`, `BUILDING`, `READY`, `ERROR` or `CANCELED`
    #[serde(default)]
    pub ready_state: Option<String>,

    #[serde(default)]
    pub inspector_url: Option<String>,

    /// Epoch millis
    #[serde(default)]
    pub created_at: Option<i64>,

    /// Epoch millis at which the deployment became ready
    #[serde(default)]
    pub ready: Option<i64>,

    #[serde(default)]
    pub error_message: Option<String>,
}

/// Error envelope: `{"error": {"code": "...", "message": "..."}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}
