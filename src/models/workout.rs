use crate::runningahead::types::RunningAheadWorkout;

/// A single workout log entry. Every field is optional because the API omits
/// whatever the athlete did not record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workout {
    /// ISO `YYYY-MM-DD`
    pub date: Option<String>,
    pub activity: Option<String>,
    pub workout_type: Option<String>,
    pub time_of_day: Option<String>,
    pub distance: Option<f64>,
    pub duration_secs: Option<u64>,
    pub course: Option<String>,
}

impl From<RunningAheadWorkout> for Workout {
    fn from(ra: RunningAheadWorkout) -> Self {
        let (distance, duration_secs) = match ra.details {
            Some(details) => (
                details.distance.and_then(|d| d.value),
                details.duration,
            ),
            None => (None, None),
        };

        Workout {
            date: ra.date,
            activity: ra.activity_name,
            workout_type: ra.workout_name,
            time_of_day: ra.time,
            distance,
            duration_secs,
            course: ra.course.and_then(|c| c.name),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_full_entry() {
        let entry: RunningAheadWorkout = serde_json::from_value(serde_json::json!({
            "date": "2021-05-10",
            "activityName": "Run",
            "workoutName": "Long",
            "time": "6:30 AM",
            "details": {
                "distance": { "value": 21.1, "unit": "km" },
                "duration": 7384
            },
            "course": { "name": "Lakeshore" }
        }))
        .unwrap();

        let workout = Workout::from(entry);
        assert_eq!(
            workout,
            Workout {
                date: Some("2021-05-10".to_string()),
                activity: Some("Run".to_string()),
                workout_type: Some("Long".to_string()),
                time_of_day: Some("6:30 AM".to_string()),
                distance: Some(21.1),
                duration_secs: Some(7384),
                course: Some("Lakeshore".to_string()),
            }
        );
    }

    #[test]
    fn test_from_sparse_entry() {
        let entry: RunningAheadWorkout = serde_json::from_value(serde_json::json!({
            "date": "2021-05-10",
            "details": { "duration": 600 },
            "course": {}
        }))
        .unwrap();

        let workout = Workout::from(entry);
        assert_eq!(
            workout,
            Workout {
                date: Some("2021-05-10".to_string()),
                duration_secs: Some(600),
                ..Default::default()
            }
        );
    }
}
