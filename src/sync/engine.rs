use crate::error::{AppError, Result};
use crate::models::ToSheetRow;
use crate::runningahead::WorkoutSource;
use crate::sheets::{SheetOpener, SheetOperations};
use crate::sheets::formatting::sheet_date;
use tracing::{debug, info, instrument};

/// Result of one sync pass. Errors are captured here instead of propagated so
/// the caller decides how a failed run is reported.
#[derive(Debug)]
pub enum SyncOutcome {
    /// The workout was appended as a new row
    Appended { date: String },
    /// The sheet's last row already holds this workout
    UpToDate { date: String },
    Failed(AppError),
}

pub struct SyncEngine<WS, SO> {
    workout_source: WS,
    sheet_opener: SO,
}

impl<WS, SO> SyncEngine<WS, SO>
where
    WS: WorkoutSource + Sync,
    SO: SheetOpener + Sync,
{
    pub fn new(workout_source: WS, sheet_opener: SO) -> Self {
        Self {
            workout_source,
            sheet_opener,
        }
    }

    pub async fn sync(&self) -> SyncOutcome {
        match self.try_sync().await {
            Ok(outcome) => outcome,
            Err(e) => SyncOutcome::Failed(e),
        }
    }

    #[instrument(name = "Sync", skip_all)]
    async fn try_sync(&self) -> Result<SyncOutcome> {
        let workout = self.workout_source.latest_workout().await?;
        let raw_date = workout.date.as_deref().ok_or_else(|| {
            AppError::RunningAhead("Most recent workout has no date".to_string())
        })?;
        let workout_date = sheet_date(raw_date)?;

        // Only authenticate against the spreadsheet once there is a workout to compare
        let sheet = self.sheet_opener.open().await?;

        let last_row = sheet.row_count().await?;
        // An empty sheet has nothing synced yet
        let last_date = match last_row {
            0 => None,
            row => Some(sheet.row_date(row).await?),
        };
        debug!(workout_date = %workout_date, ?last_date, last_row, "Comparing dates");

        if last_date.as_deref() == Some(workout_date.as_str()) {
            return Ok(SyncOutcome::UpToDate { date: workout_date });
        }

        info!(date = %workout_date, "Adding a new record into spreadsheet");
        sheet.append_row(workout.to_sheet_row()).await?;

        Ok(SyncOutcome::Appended { date: workout_date })
    }
}
