//! Railway deployment adapter

use std::sync::Arc;

use async_trait::async_trait;
use provider_api::railway::{
    GraphqlRequest, GraphqlResponse, ProjectCreateData, ProjectCreateInput,
    ProjectCreateVariables, PROJECT_CREATE_MUTATION,
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

pub const DEFAULT_BASE_URL: &str = "https://backboard.railway.app";

const DASHBOARD_URL: &str = "https://railway.app";

/// Creates a Railway project through a single GraphQL mutation.
///
/// Status checks are not available for Railway.
pub struct RailwayAdapter {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
    token: Option<SecretString>,
}

impl RailwayAdapter {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        endpoint: &str,
        token: Option<SecretString>,
    ) -> Self {
        Self {
            transport,
            endpoint: endpoint.to_string(),
            token,
        }
    }

    async fn try_deploy(
        &self,
        config: &DeployConfig,
        files: &ProjectFiles,
    ) -> Result<DeployResult, DeployError> {
        let token = require_token(Provider::Railway, self.token.as_ref())?;

        let request = GraphqlRequest {
            query: PROJECT_CREATE_MUTATION.to_string(),
            variables: ProjectCreateVariables {
                input: ProjectCreateInput {
                    name: config.project_name.clone(),
                    description: config
                        .framework
                        .as_ref()
                        .map(|framework| format!("{} project", framework)),
                },
            },
        };

        debug!(
            "Creating Railway project {} ({} files)",
            config.project_name,
            files.len()
        );
        let url = endpoint_url(&self.endpoint, &["graphql", "v2"])?;
        let response = self
            .transport
            .send(
                HttpRequest::post(url)
                    .bearer(token)
                    .json(serde_json::to_value(&request)?),
            )
            .await?;

        // GraphQL errors arrive with HTTP 200, so inspect the body first
        let envelope = serde_json::from_slice::<GraphqlResponse<ProjectCreateData>>(&response.body);
        if let Ok(envelope) = &envelope {
            if let Some(first) = envelope.errors.first() {
                return Err(DeployError::ProviderError(first.message.clone()));
            }
        }

        if !response.is_success() {
            return Err(provider_failure(Provider::Railway, &response, None));
        }

        let project = envelope?
            .data
            .and_then(|data| data.project_create)
            .ok_or_else(|| {
                DeployError::ProviderError("Railway response did not include a project".to_string())
            })?;

        let dashboard = endpoint_url(DASHBOARD_URL, &["project", project.id.as_str()])?;

        info!("Railway project {} created", project.id);
        Ok(DeployResult::new(DeployStatus::Building, None)
            .with_url(Some(dashboard.into()))
            .with_deployment_id(project.id))
    }
}

#[async_trait]
impl ProviderAdapter for RailwayAdapter {
    fn provider(&self) -> Provider {
        Provider::Railway
    }

    fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    async fn deploy(&self, config: &DeployConfig, files: &ProjectFiles) -> DeployResult {
        settle(Provider::Railway, self.try_deploy(config, files).await)
    }
}
