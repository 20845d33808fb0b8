//! Netlify REST models (`/api/v1`)

use serde::{Deserialize, Serialize};

/// Create site request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSiteRequest {
    pub name: String,
}

/// Site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub ssl_url: Option<String>,
}

/// Deploy, returned by the zip upload and by `GET /deploys/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deploy {
    pub id: String,

    #[serde(default)]
    pub site_id: Option<String>,

    /// `new`, `uploading`, `processing`, `building`, `ready` or `error`
    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub ssl_url: Option<String>,

    /// Unique URL for this deploy
    #[serde(default)]
    pub deploy_ssl_url: Option<String>,

    #[serde(default)]
    pub error_message: Option<String>,

    /// RFC 3339
    #[serde(default)]
    pub created_at: Option<String>,

    /// RFC 3339
    #[serde(default)]
    pub published_at: Option<String>,
}

/// Error body, either `{"message": ...}` or `{"error": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<u16>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
