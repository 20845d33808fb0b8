//! Caller-side status polling
//!
//! The facade performs one status fetch per call. This helper drives the
//! fetch loop for callers that want to block until a deployment settles.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info};

use crate::deploy::service::DeployService;
use crate::models::deployment::{DeployResult, Provider};
use crate::utils::{calc_exp_backoff, CooldownOptions};

/// Poll options
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Delay between fetches
    pub cooldown: CooldownOptions,

    /// Maximum number of status fetches, at least one is always made
    pub max_attempts: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            cooldown: CooldownOptions::default(),
            max_attempts: 60,
        }
    }
}

/// Poll until the deployment reaches a terminal status
pub async fn wait_for_terminal(
    service: &DeployService,
    provider: Provider,
    deployment_id: &str,
    options: &PollOptions,
) -> DeployResult {
    wait_for_terminal_with(service, provider, deployment_id, options, tokio::time::sleep).await
}

/// Same as [`wait_for_terminal`] with an injectable sleep.
///
/// Returns the last observed result when attempts run out.
pub async fn wait_for_terminal_with<S, F>(
    service: &DeployService,
    provider: Provider,
    deployment_id: &str,
    options: &PollOptions,
    sleep_fn: S,
) -> DeployResult
where
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let max_attempts = options.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        let result = service.get_deployment_status(provider, deployment_id).await;
        attempt += 1;

        if result.status.is_terminal() {
            info!(
                "{} deployment {} settled as {} after {} checks",
                provider, deployment_id, result.status, attempt
            );
            return result;
        }

        if attempt >= max_attempts {
            info!(
                "Gave up waiting for {} deployment {} after {} checks (still {})",
                provider, deployment_id, attempt, result.status
            );
            return result;
        }

        let delay = calc_exp_backoff(&options.cooldown, attempt - 1);
        debug!(
            "{} deployment {} is {}, checking again in {:?}",
            provider, deployment_id, result.status, delay
        );
        sleep_fn(delay).await;
    }
}
