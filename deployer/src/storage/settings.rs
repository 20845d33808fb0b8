//! Settings file management

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::deploy::poller::PollOptions;
use crate::deploy::{netlify, railway, render, vercel};
use crate::errors::DeployError;
use crate::filesys::file::File;
use crate::logs::LogLevel;
use crate::utils::CooldownOptions;

/// Default settings file, relative to the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "shipyard.json";

/// Deployer settings.
///
/// Tokens are deliberately absent: they are only read from the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit JSON log lines
    #[serde(default)]
    pub json_logs: bool,

    /// Directory for rolling log files, disabled when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Provider API base URLs
    #[serde(default)]
    pub endpoints: EndpointSettings,

    /// Status polling used by `--wait`
    #[serde(default)]
    pub poll: PollSettings,
}

impl Settings {
    /// Load settings from `file`, using defaults when it does not exist
    pub async fn load(file: &File) -> Result<Self, DeployError> {
        if !file.exists().await {
            debug!("No settings at {}, using defaults", file.path().display());
            return Ok(Self::default());
        }

        let settings: Settings = file.read_json().await?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), DeployError> {
        for (name, endpoint) in self.endpoints.iter() {
            let valid = Url::parse(endpoint)
                .map(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base())
                .unwrap_or(false);
            if !valid {
                return Err(DeployError::ConfigError(format!(
                    "endpoints.{} must be an http(s) URL, got '{}'",
                    name, endpoint
                )));
            }
        }

        if self.poll.max_interval_secs < self.poll.interval_secs {
            return Err(DeployError::ConfigError(
                "poll.max_interval_secs must not be below poll.interval_secs".to_string(),
            ));
        }

        Ok(())
    }
}

/// Provider API base URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointSettings {
    #[serde(default = "default_vercel_url")]
    pub vercel: String,

    #[serde(default = "default_netlify_url")]
    pub netlify: String,

    #[serde(default = "default_railway_url")]
    pub railway: String,

    #[serde(default = "default_render_url")]
    pub render: String,
}

fn default_vercel_url() -> String {
    vercel::DEFAULT_BASE_URL.to_string()
}

fn default_netlify_url() -> String {
    netlify::DEFAULT_BASE_URL.to_string()
}

fn default_railway_url() -> String {
    railway::DEFAULT_BASE_URL.to_string()
}

fn default_render_url() -> String {
    render::DEFAULT_BASE_URL.to_string()
}

impl EndpointSettings {
    fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("vercel", self.vercel.as_str()),
            ("netlify", self.netlify.as_str()),
            ("railway", self.railway.as_str()),
            ("render", self.render.as_str()),
        ]
        .into_iter()
    }
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            vercel: default_vercel_url(),
            netlify: default_netlify_url(),
            railway: default_railway_url(),
            render: default_render_url(),
        }
    }
}

/// Status polling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSettings {
    /// Initial delay between status checks in seconds
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Upper bound for the backoff delay in seconds
    #[serde(default = "default_max_interval")]
    pub max_interval_secs: u64,

    /// Maximum number of status checks
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_interval() -> u64 {
    2
}

fn default_max_interval() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    60
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            max_interval_secs: default_max_interval(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl From<&PollSettings> for PollOptions {
    fn from(settings: &PollSettings) -> Self {
        PollOptions {
            cooldown: CooldownOptions {
                base_delay: Duration::from_secs(settings.interval_secs),
                max_delay: Duration::from_secs(settings.max_interval_secs),
                ..Default::default()
            },
            max_attempts: settings.max_attempts,
        }
    }
}
