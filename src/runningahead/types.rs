use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(super) struct WorkoutsResponse {
    pub(super) data: WorkoutLog,
}

#[derive(Debug, Deserialize)]
pub(super) struct WorkoutLog {
    pub(super) entries: Vec<RunningAheadWorkout>,
}

// https://api.runningahead.com/docs/log/list_workouts
// Only the fields requested via the `fields` selector are present, and any of
// them may still be missing from an individual entry. A value of the wrong
// shape is read as missing so it only blanks its own cell.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningAheadWorkout {
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub activity_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub workout_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub details: Option<RunningAheadDetails>,
    #[serde(default, deserialize_with = "lenient")]
    pub course: Option<RunningAheadCourse>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunningAheadDetails {
    #[serde(default, deserialize_with = "lenient")]
    pub distance: Option<RunningAheadDistance>,
    /// Seconds
    #[serde(default, deserialize_with = "seconds")]
    pub duration: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct RunningAheadDistance {
    #[serde(default, deserialize_with = "number")]
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RunningAheadCourse {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// `None` for null or for anything that doesn't deserialize as `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A JSON number, or a string holding one.
fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Whole seconds; fractional durations are truncated, negative ones dropped.
fn seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(deserializer)?
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(|secs| secs.trunc() as u64))
}
