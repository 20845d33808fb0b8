//! Deployment facade

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::deploy::adapter::ProviderAdapter;
use crate::deploy::credentials::Credentials;
use crate::deploy::netlify::NetlifyAdapter;
use crate::deploy::railway::RailwayAdapter;
use crate::deploy::render::RenderAdapter;
use crate::deploy::vercel::VercelAdapter;
use crate::errors::DeployError;
use crate::http::client::HttpTransport;
use crate::models::deployment::{DeployConfig, DeployResult, Provider};
use crate::models::project::ProjectFiles;
use crate::storage::settings::EndpointSettings;

/// Single entry point over all provider adapters.
///
/// Holds only read-only state, so one instance can serve concurrent calls.
/// Every public operation returns a `DeployResult`; nothing is propagated as
/// an error.
pub struct DeployService {
    adapters: HashMap<Provider, Arc<dyn ProviderAdapter>>,
}

impl DeployService {
    /// Create the service with the four built-in adapters
    pub fn new(
        mut credentials: Credentials,
        transport: Arc<dyn HttpTransport>,
        endpoints: &EndpointSettings,
    ) -> Self {
        let adapters: Vec<Arc<dyn ProviderAdapter>> = vec![
            Arc::new(VercelAdapter::new(
                transport.clone(),
                &endpoints.vercel,
                credentials.take_token(Provider::Vercel),
                credentials.vercel_team_id.take(),
            )),
            Arc::new(NetlifyAdapter::new(
                transport.clone(),
                &endpoints.netlify,
                credentials.take_token(Provider::Netlify),
            )),
            Arc::new(RailwayAdapter::new(
                transport.clone(),
                &endpoints.railway,
                credentials.take_token(Provider::Railway),
            )),
            Arc::new(RenderAdapter::new(
                transport,
                &endpoints.render,
                credentials.take_token(Provider::Render),
                credentials.render_owner_id.take(),
            )),
        ];

        Self::from_adapters(adapters)
    }

    /// Create the service from an explicit adapter set
    pub fn from_adapters(adapters: impl IntoIterator<Item = Arc<dyn ProviderAdapter>>) -> Self {
        let adapters = adapters
            .into_iter()
            .map(|adapter| (adapter.provider(), adapter))
            .collect();

        Self { adapters }
    }

    fn adapter(&self, provider: Provider) -> Result<&Arc<dyn ProviderAdapter>, DeployError> {
        self.adapters
            .get(&provider)
            .ok_or(DeployError::UnsupportedProvider(provider))
    }

    /// Deploy `files` to the provider named in `config`
    pub async fn deploy(&self, config: &DeployConfig, files: &ProjectFiles) -> DeployResult {
        let adapter = match self.adapter(config.provider) {
            Ok(adapter) => adapter,
            Err(e) => {
                warn!("Deploy rejected: {}", e);
                return DeployResult::from(e);
            }
        };

        info!(
            "Deploying {} to {} ({} files)",
            config.project_name,
            config.provider,
            files.len()
        );
        let result = adapter.deploy(config, files).await;
        debug!(
            "{} deploy of {} finished with status {}",
            config.provider, config.project_name, result.status
        );
        result
    }

    /// Fetch the status of a deployment once
    pub async fn get_deployment_status(
        &self,
        provider: Provider,
        deployment_id: &str,
    ) -> DeployResult {
        match self.adapter(provider) {
            Ok(adapter) => {
                debug!("Checking {} deployment {}", provider, deployment_id);
                adapter.get_status(deployment_id).await
            }
            Err(e) => DeployResult::from(e),
        }
    }

    /// Whether `provider` has an adapter with a token
    pub fn is_provider_configured(&self, provider: Provider) -> bool {
        self.adapters
            .get(&provider)
            .map(|adapter| adapter.is_configured())
            .unwrap_or(false)
    }

    /// Configured providers, in canonical order
    pub fn get_available_providers(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.is_provider_configured(*p))
            .collect()
    }
}
