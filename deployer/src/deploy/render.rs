//! Render deployment adapter

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use provider_api::render::{
    CreateServiceRequest, CreateServiceResponse, EnvVar, ErrorBody, StaticSiteDetails,
    STATIC_SITE,
};
use secrecy::SecretString;
use tracing::{debug, info};

use crate::deploy::adapter::{
    endpoint_url, provider_failure, require_token, settle, ProviderAdapter,
};
use crate::errors::DeployError;
use crate::http::client::{HttpRequest, HttpTransport};
use crate::models::deployment::{DeployConfig, DeployResult, DeployStatus, Provider};
use crate::models::project::ProjectFiles;

pub const DEFAULT_BASE_URL: &str = "https://api.render.com";

/// Creates a Render static site service.
///
/// Status checks are not available for Render.
pub struct RenderAdapter {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
    token: Option<SecretString>,
    owner_id: Option<String>,
}

impl RenderAdapter {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        endpoint: &str,
        token: Option<SecretString>,
        owner_id: Option<String>,
    ) -> Self {
        Self {
            transport,
            endpoint: endpoint.to_string(),
            token,
            owner_id,
        }
    }

    async fn try_deploy(
        &self,
        config: &DeployConfig,
        files: &ProjectFiles,
    ) -> Result<DeployResult, DeployError> {
        let token = require_token(Provider::Render, self.token.as_ref())?;

        let request = CreateServiceRequest {
            service_type: STATIC_SITE.to_string(),
            name: config.project_name.clone(),
            owner_id: self.owner_id.clone(),
            service_details: StaticSiteDetails {
                build_command: config.build_command.clone(),
                publish_path: config.output_directory.clone(),
            },
            env_vars: flatten_env_vars(&config.environment_variables),
        };

        debug!(
            "Creating Render static site {} ({} files)",
            config.project_name,
            files.len()
        );
        let url = endpoint_url(&self.endpoint, &["v1", "services"])?;
        let response = self
            .transport
            .send(
                HttpRequest::post(url)
                    .bearer(token)
                    .json(serde_json::to_value(&request)?),
            )
            .await?;

        if !response.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&response.body)
                .ok()
                .and_then(|e| e.message);
            return Err(provider_failure(Provider::Render, &response, message));
        }

        let created: CreateServiceResponse = response.json()?;
        let service_id = created.service_id().ok_or_else(|| {
            DeployError::ProviderError("Render response did not include a service id".to_string())
        })?;

        info!("Render service {} created", service_id);
        Ok(DeployResult::new(DeployStatus::Building, None)
            .with_deployment_id(service_id)
            .with_url(created.service_url().map(str::to_string)))
    }
}

#[async_trait]
impl ProviderAdapter for RenderAdapter {
    fn provider(&self) -> Provider {
        Provider::Render
    }

    fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    async fn deploy(&self, config: &DeployConfig, files: &ProjectFiles) -> DeployResult {
        settle(Provider::Render, self.try_deploy(config, files).await)
    }
}

/// Render only accepts environment variables as a `[{key, value}]` list
pub fn flatten_env_vars(vars: &BTreeMap<String, String>) -> Vec<EnvVar> {
    vars.iter()
        .map(|(key, value)| EnvVar {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}
