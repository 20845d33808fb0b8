//! Shipyard - Entry Point
//!
//! Deploys a build directory to one of the supported hosting providers and
//! reports deployment status as JSON on stdout.

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use shipyard::deploy::credentials::Credentials;
use shipyard::deploy::poller::{wait_for_terminal, PollOptions};
use shipyard::deploy::service::DeployService;
use shipyard::filesys::dir::Dir;
use shipyard::filesys::file::File;
use shipyard::http::client::ReqwestTransport;
use shipyard::logs::{init_logging, LogOptions};
use shipyard::models::deployment::{DeployConfig, DeployResult, DeployStatus, Provider};
use shipyard::models::project::ProjectFiles;
use shipyard::storage::settings::{Settings, DEFAULT_SETTINGS_FILE};
use shipyard::utils::version_info;

use tracing::{error, info};

const USAGE: &str = "\
Usage:
  shipyard --deploy --provider=<vercel|netlify|railway|render> --project=<name> --dir=<path>
           [--framework=..] [--build-command=..] [--output-dir=..] [--install-command=..]
           [--env=KEY=VALUE,..] [--regions=a,b] [--wait]
  shipyard --status --provider=<vercel|netlify> --id=<deployment id> [--wait]
  shipyard --providers
  shipyard --init
  shipyard --version

Common options:
  --settings=<path>   settings file (default: shipyard.json)";

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command line arguments
    let mut cli_args: HashMap<String, String> = HashMap::new();

    for arg in env::args().skip(1) {
        if let Some((key, value)) = arg.split_once('=') {
            // Handle --key=value format
            let clean_key = key.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), value.to_string());
        } else if arg.starts_with("--") {
            // Handle standalone flags like --version
            let clean_key = arg.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), "true".to_string());
        }
    }

    match run(&cli_args).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli_args: &HashMap<String, String>) -> anyhow::Result<ExitCode> {
    if cli_args.contains_key("version") {
        println!("{}", serde_json::to_string_pretty(&version_info())?);
        return Ok(ExitCode::SUCCESS);
    }

    let settings_file = File::new(
        cli_args
            .get("settings")
            .map(String::as_str)
            .unwrap_or(DEFAULT_SETTINGS_FILE),
    );

    if cli_args.contains_key("init") {
        settings_file
            .write_json(&Settings::default())
            .await
            .context("Unable to write settings file")?;
        println!("Settings written to {}", settings_file.path().display());
        return Ok(ExitCode::SUCCESS);
    }

    let settings = Settings::load(&settings_file)
        .await
        .context("Unable to read settings file")?;

    // Initialize logging
    let log_options = LogOptions {
        log_level: settings.log_level.clone(),
        json_format: settings.json_logs,
        log_dir: settings.log_dir.as_ref().map(Into::into),
        ..Default::default()
    };
    let _log_guard = match init_logging(log_options) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            None
        }
    };

    let transport = Arc::new(ReqwestTransport::new()?);
    let service = DeployService::new(Credentials::from_env(), transport, &settings.endpoints);
    let poll_options = PollOptions::from(&settings.poll);

    if cli_args.contains_key("providers") {
        print_providers(&service);
        return Ok(ExitCode::SUCCESS);
    }

    let provider = match cli_args.get("provider").map(|p| p.parse::<Provider>()) {
        Some(Ok(provider)) => provider,
        Some(Err(e)) => return report(&DeployResult::from(e)),
        None if cli_args.contains_key("deploy") || cli_args.contains_key("status") => {
            anyhow::bail!("--provider is required\n\n{}", USAGE)
        }
        None => {
            println!("{}", USAGE);
            return Ok(ExitCode::SUCCESS);
        }
    };
    let wait = cli_args.contains_key("wait");

    if cli_args.contains_key("deploy") {
        let config = deploy_config(provider, cli_args)?;
        let dir = Dir::new(required(cli_args, "dir")?);
        let files = ProjectFiles::load(&dir)
            .await
            .with_context(|| format!("Unable to load project files from {}", dir.path().display()))?;

        info!("Loaded {} files from {}", files.len(), dir.path().display());
        let mut result = service.deploy(&config, &files).await;

        if wait && !result.status.is_terminal() {
            if let Some(id) = result.deployment_id.clone() {
                result = wait_for_terminal(&service, provider, &id, &poll_options).await;
            }
        }
        return report(&result);
    }

    if cli_args.contains_key("status") {
        let id = required(cli_args, "id")?;
        let result = if wait {
            wait_for_terminal(&service, provider, id, &poll_options).await
        } else {
            service.get_deployment_status(provider, id).await
        };
        return report(&result);
    }

    println!("{}", USAGE);
    Ok(ExitCode::SUCCESS)
}

fn required<'a>(cli_args: &'a HashMap<String, String>, key: &str) -> anyhow::Result<&'a str> {
    cli_args
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.is_empty() && *v != "true")
        .with_context(|| format!("--{} is required\n\n{}", key, USAGE))
}

fn deploy_config(
    provider: Provider,
    cli_args: &HashMap<String, String>,
) -> anyhow::Result<DeployConfig> {
    let mut config = DeployConfig::new(provider, required(cli_args, "project")?);
    config.framework = cli_args.get("framework").cloned();
    config.build_command = cli_args.get("build-command").cloned();
    config.output_directory = cli_args.get("output-dir").cloned();
    config.install_command = cli_args.get("install-command").cloned();

    if let Some(env_list) = cli_args.get("env") {
        config.environment_variables = parse_env_list(env_list)?;
    }

    if let Some(regions) = cli_args.get("regions") {
        config.regions = regions
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(String::from)
            .collect();
    }

    Ok(config)
}

/// Parse `KEY=VALUE,KEY2=VALUE2`
fn parse_env_list(list: &str) -> anyhow::Result<BTreeMap<String, String>> {
    list.split(',')
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| -> anyhow::Result<(String, String)> {
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("Invalid environment variable '{}', expected KEY=VALUE", pair))?;
            Ok((key.trim().to_string(), value.to_string()))
        })
        .collect()
}

fn print_providers(service: &DeployService) {
    for provider in Provider::ALL {
        let state = if service.is_provider_configured(provider) {
            "configured".green()
        } else {
            format!("not configured (set {})", provider.token_env_var()).yellow()
        };
        println!("{:<8} {}", provider.as_str().bold(), state);
    }
}

/// Print the result and map it to an exit code
fn report(result: &DeployResult) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(result)?);

    Ok(match result.status {
        DeployStatus::Error | DeployStatus::Cancelled => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
