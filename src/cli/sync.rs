use crate::config::Config;
use crate::error::Result;
use crate::runningahead::RunningAheadClient;
use crate::secrets::Secrets;
use crate::sync::{SyncEngine, SyncOutcome};
use tracing::{error, info};

/// Run one sync pass. Missing configuration aborts with an error; anything
/// that goes wrong while talking to the remote services is logged and the
/// run still completes.
pub async fn execute(config: Config) -> Result<()> {
    let secrets = Secrets::load(&config.runningahead.secrets_file)?;
    let runningahead_client = RunningAheadClient::new(&config.runningahead, &secrets)?;

    // The spreadsheet is only opened once the workout has been fetched
    let outcome = SyncEngine::new(runningahead_client, config.google)
        .sync()
        .await;

    match outcome {
        SyncOutcome::Appended { date } => {
            info!(date = %date, "New record successfully added to google spreadsheet")
        }
        SyncOutcome::UpToDate { date } => {
            info!(date = %date, "There are no new records from RunningAhead")
        }
        // Not propagated: a failed run is reported through the log only
        SyncOutcome::Failed(e) => error!("Sync failed: {}", e),
    }

    Ok(())
}
