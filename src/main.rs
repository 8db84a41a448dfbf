mod cli;
mod config;
mod error;
mod logging;
mod models;
mod runningahead;
mod secrets;
mod sheets;
mod sync;

use clap::Parser;

use crate::cli::Cli;
use crate::config::Config;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Program started");
    let code = match cli.run(config).await {
        Ok(()) => 0,
        Err(e) => {
            error!("Error: {}", e);
            1
        }
    };
    info!("Program finished");

    // process::exit skips destructors, so flush the log file first
    drop(guard);
    std::process::exit(code);
}
