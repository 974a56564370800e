use std::path::PathBuf;

use anyhow::Context;
use tracing::{error, info};

use sonar_lib::bootstrap::{init_tracing_subscriber, resolve_config, run_onboarding};

/// Environment variable consulted when no config path is passed.
const CONFIG_ENV: &str = "SONAR_CONFIG";

fn config_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = resolve_config(config_path())?;

    if let Err(err) = init_tracing_subscriber(&config.log_dir) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let summary = match run_onboarding(&config).await {
        Ok(summary) => summary,
        Err(err) => {
            error!(error = %format!("{err:#}"), "onboarding run failed");
            return Err(err);
        }
    };

    info!(
        session = %summary.session_id,
        screens = ?summary.screens,
        "onboarding session complete"
    );
    let progress = serde_json::to_string_pretty(&summary.progress)
        .context("Failed to serialize onboarding progress")?;
    println!("{progress}");

    Ok(())
}
