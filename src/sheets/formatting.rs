use crate::error::{AppError, Result};
use chrono::{Datelike, NaiveDate};

/// Convert an ISO `2017-02-03` date into the sheet's `2/3/2017` form.
pub fn sheet_date(iso_date: &str) -> Result<String> {
    let date =
        NaiveDate::parse_from_str(iso_date, "%Y-%m-%d").map_err(|source| AppError::DateFormat {
            input: iso_date.to_string(),
            source,
        })?;

    Ok(format!("{}/{}/{}", date.month(), date.day(), date.year()))
}

/// Render a duration in seconds as `H:MM:SS`. Hours are not wrapped.
pub fn hms_duration(total_secs: u64) -> String {
    let (minutes, seconds) = (total_secs / 60, total_secs % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}
