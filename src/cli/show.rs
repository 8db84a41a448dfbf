use crate::config::Config;
use crate::error::Result;
use crate::models::{HEADERS, ToSheetRow};
use crate::runningahead::{RunningAheadClient, WorkoutSource};
use crate::secrets::Secrets;
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ShowResource {
    /// Show configuration, credential and log paths
    Paths,
    /// Show the row the latest workout would be synced as
    Latest,
}

impl ShowResource {
    pub async fn execute(&self, config: Config) -> Result<()> {
        match self {
            ShowResource::Paths => show_paths(&config),
            ShowResource::Latest => show_latest(&config).await,
        }
    }
}

fn show_paths(config: &Config) -> Result<()> {
    let config_path = Config::config_file()?;

    info!(path = ?config_path, "Config path");
    info!(path = ?config.runningahead.secrets_file, "Secrets path");
    info!(path = ?config.google.service_account_key, "Service account key path");
    info!(path = ?config.logging.file, "Log path");

    Ok(())
}

async fn show_latest(config: &Config) -> Result<()> {
    let secrets = Secrets::load(&config.runningahead.secrets_file)?;
    let client = RunningAheadClient::new(&config.runningahead, &secrets)?;
    let row = client.latest_workout().await?.to_sheet_row();

    for (header, cell) in HEADERS.iter().zip(row.cells()) {
        info!(value = %cell, "{}", header);
    }

    Ok(())
}
