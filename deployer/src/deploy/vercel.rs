//! Vercel deployment adapter

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use provider_api::vercel::{
    CreateDeploymentRequest, Deployment, ErrorEnvelope, InlineFile, ProjectSettings,
};
use secrecy::SecretString;
use tracing::{debug, info};
use url::Url;

use crate::deploy::adapter::{
    endpoint_url, provider_failure, require_token, settle, ProviderAdapter,
};
use crate::errors::DeployError;
use crate::http::client::{HttpRequest, HttpResponse, HttpTransport};
use crate::models::deployment::{
    ensure_https, DeployConfig, DeployResult, DeployStatus, Provider,
};
use crate::models::project::ProjectFiles;

pub const DEFAULT_BASE_URL: &str = "https://api.vercel.com";

/// Single-call deploys with files inlined as base64
pub struct VercelAdapter {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
    token: Option<SecretString>,
    team_id: Option<String>,
}

impl VercelAdapter {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        endpoint: &str,
        token: Option<SecretString>,
        team_id: Option<String>,
    ) -> Self {
        Self {
            transport,
            endpoint: endpoint.to_string(),
            token,
            team_id,
        }
    }

    fn deployments_url(&self, id: Option<&str>) -> Result<Url, DeployError> {
        let mut segments = vec!["v13", "deployments"];
        segments.extend(id);

        let mut url = endpoint_url(&self.endpoint, &segments)?;
        if let Some(team_id) = &self.team_id {
            url.query_pairs_mut().append_pair("teamId", team_id);
        }
        Ok(url)
    }

    async fn try_deploy(
        &self,
        config: &DeployConfig,
        files: &ProjectFiles,
    ) -> Result<DeployResult, DeployError> {
        let token = require_token(Provider::Vercel, self.token.as_ref())?;
        files.validate()?;

        let request = CreateDeploymentRequest {
            name: config.project_name.clone(),
            files: files
                .iter()
                .map(|f| InlineFile {
                    file: f.path.clone(),
                    data: f.to_base64(),
                    encoding: "base64".to_string(),
                })
                .collect(),
            project_settings: ProjectSettings {
                framework: config.framework.clone(),
                build_command: config.build_command.clone(),
                output_directory: config.output_directory.clone(),
                install_command: config.install_command.clone(),
            },
            env: config.environment_variables.clone(),
            regions: config.regions.clone(),
            target: "production".to_string(),
        };

        debug!(
            "Creating Vercel deployment for {} ({} files)",
            config.project_name,
            files.len()
        );
        let response = self
            .transport
            .send(
                HttpRequest::post(self.deployments_url(None)?)
                    .bearer(token)
                    .json(serde_json::to_value(&request)?),
            )
            .await?;

        let deployment = parse_deployment(&response)?;
        info!(
            "Vercel deployment {} created ({:?})",
            deployment.id, deployment.ready_state
        );
        Ok(to_result(deployment))
    }

    async fn try_get_status(&self, deployment_id: &str) -> Result<DeployResult, DeployError> {
        let token = require_token(Provider::Vercel, self.token.as_ref())?;

        let response = self
            .transport
            .send(HttpRequest::get(self.deployments_url(Some(deployment_id))?).bearer(token))
            .await?;

        Ok(to_result(parse_deployment(&response)?))
    }
}

#[async_trait]
impl ProviderAdapter for VercelAdapter {
    fn provider(&self) -> Provider {
        Provider::Vercel
    }

    fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    async fn deploy(&self, config: &DeployConfig, files: &ProjectFiles) -> DeployResult {
        settle(Provider::Vercel, self.try_deploy(config, files).await)
    }

    async fn get_status(&self, deployment_id: &str) -> DeployResult {
        settle(Provider::Vercel, self.try_get_status(deployment_id).await)
    }
}

fn parse_deployment(response: &HttpResponse) -> Result<Deployment, DeployError> {
    if !response.is_success() {
        let message = serde_json::from_slice::<ErrorEnvelope>(&response.body)
            .ok()
            .and_then(|e| e.error)
            .and_then(|e| e.message);
        return Err(provider_failure(Provider::Vercel, response, message));
    }
    response.json()
}

/// Map Vercel's `readyState`
pub fn map_ready_state(state: Option<&str>) -> DeployStatus {
    match state {
        Some("READY") => DeployStatus::Ready,
        Some("ERROR") => DeployStatus::Error,
        Some("CANCELED") => DeployStatus::Cancelled,
        _ => DeployStatus::Building,
    }
}

fn from_millis(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}

fn to_result(deployment: Deployment) -> DeployResult {
    let status = map_ready_state(deployment.ready_state.as_deref());

    DeployResult::new(status, deployment.error_message)
        .with_deployment_id(deployment.id)
        .with_url(deployment.url.as_deref().map(ensure_https))
        .with_preview_url(deployment.inspector_url)
        .with_created_at(from_millis(deployment.created_at))
        .with_ready_at(from_millis(deployment.ready))
}
