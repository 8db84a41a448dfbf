use crate::models::Workout;
use crate::sheets::formatting::{hms_duration, sheet_date};

pub const COLUMN_COUNT: usize = 7;

/// Column order of the workout sheet.
pub const HEADERS: [&str; COLUMN_COUNT] = [
    "Date",
    "Activity",
    "Workout Type",
    "Time of Day",
    "Distance",
    "Duration",
    "Course Name",
];

/// One spreadsheet row, always exactly [`COLUMN_COUNT`] cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow([String; COLUMN_COUNT]);

impl SheetRow {
    pub fn cells(&self) -> &[String; COLUMN_COUNT] {
        &self.0
    }

    pub fn date(&self) -> &str {
        &self.0[0]
    }

    pub fn into_values(self) -> Vec<serde_json::Value> {
        self.0.into_iter().map(serde_json::Value::String).collect()
    }
}

pub trait ToSheetRow {
    fn to_sheet_row(&self) -> SheetRow;
}

fn optional<T>(value: Option<T>, render: impl FnOnce(T) -> String) -> String {
    value.map(render).unwrap_or_default()
}

impl ToSheetRow for Workout {
    fn to_sheet_row(&self) -> SheetRow {
        // Dates that don't parse are kept as-is rather than dropped
        let date = optional(self.date.as_deref(), |d| {
            sheet_date(d).unwrap_or_else(|_| d.to_string())
        });

        SheetRow([
            date,
            optional(self.activity.clone(), |s| s),
            optional(self.workout_type.clone(), |s| s),
            optional(self.time_of_day.clone(), |s| s),
            optional(self.distance, |d| d.to_string()),
            optional(self.duration_secs, hms_duration),
            optional(self.course.clone(), |s| s),
        ])
    }
}
