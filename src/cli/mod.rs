mod show;
mod sync;

use crate::config::Config;
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use show::ShowResource;

#[derive(Parser, Debug)]
#[command(name = "workout-sheet-sync")]
#[command(about = "Append the latest RunningAhead workout to a Google spreadsheet", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(&self, config: Config) -> Result<()> {
        match &self.command {
            Commands::Sync => sync::execute(config).await,
            Commands::Show { resource } => resource.execute(config).await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append the most recent workout unless the sheet already has it
    Sync,
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
}
