//! Netlify deployment adapter

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use provider_api::netlify::{CreateSiteRequest, Deploy, ErrorBody, Site};
use secrecy::SecretString;
use tracing::{debug, info};

use crate::deploy::adapter::{
    endpoint_url, provider_failure, require_token, settle, ProviderAdapter,
};
use crate::deploy::archive::build_zip;
use crate::errors::DeployError;
use crate::http::client::{HttpRequest, HttpResponse, HttpTransport, StatusCode};
use crate::models::deployment::{DeployConfig, DeployResult, DeployStatus, Provider};
use crate::models::project::ProjectFiles;

pub const DEFAULT_BASE_URL: &str = "https://api.netlify.com";

/// Two-phase deploys: ensure the site exists, then upload a ZIP of the files
pub struct NetlifyAdapter {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
    token: Option<SecretString>,
}

impl NetlifyAdapter {
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

    /// Create the site, or fall back to the existing one when the name is taken.
    ///
    /// Netlify answers 422 for a duplicate name. The existing site is then
    /// addressed by its default domain, which the API accepts as a site id.
    async fn ensure_site(&self, token: &str, name: &str) -> Result<String, DeployError> {
        let body = serde_json::to_value(CreateSiteRequest {
            name: name.to_string(),
        })?;
        let url = endpoint_url(&self.endpoint, &["api", "v1", "sites"])?;
        let response = self
            .transport
            .send(
                HttpRequest::post(url)
                    .bearer(token)
                    .json(body),
            )
            .await?;

        if response.status == StatusCode::UNPROCESSABLE_ENTITY {
            debug!("Netlify site {} already exists, reusing it", name);
            return Ok(existing_site_id(name));
        }

        if !response.is_success() {
            return Err(provider_failure(
                Provider::Netlify,
                &response,
                error_message(&response),
            ));
        }

        let site: Site = response.json()?;
        debug!("Created Netlify site {} ({})", name, site.id);
        Ok(site.id)
    }

    async fn try_deploy(
        &self,
        config: &DeployConfig,
        files: &ProjectFiles,
    ) -> Result<DeployResult, DeployError> {
        let token = require_token(Provider::Netlify, self.token.as_ref())?;

        let site_id = self.ensure_site(&token, &config.project_name).await?;
        let archive = build_zip(files)?;

        let url = endpoint_url(
            &self.endpoint,
            &["api", "v1", "sites", site_id.as_str(), "deploys"],
        )?;
        let response = self
            .transport
            .send(
                HttpRequest::post(url)
                    .bearer(token)
                    .bytes("application/zip", archive),
            )
            .await?;

        let deploy = parse_deploy(&response)?;
        info!(
            "Netlify deploy {} created for site {} ({:?})",
            deploy.id, site_id, deploy.state
        );
        Ok(to_result(deploy))
    }

    async fn try_get_status(&self, deployment_id: &str) -> Result<DeployResult, DeployError> {
        let token = require_token(Provider::Netlify, self.token.as_ref())?;

        let url = endpoint_url(&self.endpoint, &["api", "v1", "deploys", deployment_id])?;
        let response = self
            .transport
            .send(HttpRequest::get(url).bearer(token))
            .await?;

        Ok(to_result(parse_deploy(&response)?))
    }
}

#[async_trait]
impl ProviderAdapter for NetlifyAdapter {
    fn provider(&self) -> Provider {
        Provider::Netlify
    }

    fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    async fn deploy(&self, config: &DeployConfig, files: &ProjectFiles) -> DeployResult {
        settle(Provider::Netlify, self.try_deploy(config, files).await)
    }

    async fn get_status(&self, deployment_id: &str) -> DeployResult {
        settle(Provider::Netlify, self.try_get_status(deployment_id).await)
    }
}

/// Site id used when the site already exists
pub fn existing_site_id(name: &str) -> String {
    format!("{}.netlify.app", name)
}

fn error_message(response: &HttpResponse) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(ErrorBody::into_message)
}

fn parse_deploy(response: &HttpResponse) -> Result<Deploy, DeployError> {
    if !response.is_success() {
        return Err(provider_failure(
            Provider::Netlify,
            response,
            error_message(response),
        ));
    }
    response.json()
}

/// Map Netlify's deploy `state`
pub fn map_state(state: Option<&str>) -> DeployStatus {
    match state {
        Some("ready") => DeployStatus::Ready,
        Some("error") => DeployStatus::Error,
        _ => DeployStatus::Building,
    }
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn to_result(deploy: Deploy) -> DeployResult {
    let status = map_state(deploy.state.as_deref());
    let url = deploy.ssl_url.or(deploy.url);

    DeployResult::new(status, deploy.error_message)
        .with_deployment_id(deploy.id)
        .with_url(url)
        .with_preview_url(deploy.deploy_ssl_url)
        .with_created_at(parse_timestamp(deploy.created_at.as_deref()))
        .with_ready_at(parse_timestamp(deploy.published_at.as_deref()))
}
