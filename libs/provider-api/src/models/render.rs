//! Render REST models (`/v1/services`)

use serde::{Deserialize, Serialize};

/// Service type for static sites
pub const STATIC_SITE: &str = "static_site";

/// Environment variable in Render's list form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticSiteDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_path: Option<String>,
}

/// Create service request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    #[serde(rename = "type")]
    pub service_type: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    pub service_details: StaticSiteDetails,

    /// Render rejects a map here
    pub env_vars: Vec<EnvVar>,
}

/// Create service response
///
/// Current API versions wrap the service (`{"service": {...}, "deployId": ...}`),
/// older ones return the service object directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceResponse {
    #[serde(default)]
    pub service: Option<Service>,

    #[serde(default)]
    pub deploy_id: Option<String>,

    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub service_details: Option<ServiceDetails>,
}

impl CreateServiceResponse {
    pub fn service_id(&self) -> Option<&str> {
        self.service
            .as_ref()
            .map(|s| s.id.as_str())
            .or(self.id.as_deref())
    }

    pub fn service_url(&self) -> Option<&str> {
        self.service
            .as_ref()
            .and_then(|s| s.service_details.as_ref())
            .or(self.service_details.as_ref())
            .and_then(|d| d.url.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub dashboard_url: Option<String>,

    #[serde(default)]
    pub service_details: Option<ServiceDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDetails {
    #[serde(default)]
    pub url: Option<String>,
}

/// Error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}
