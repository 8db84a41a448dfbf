use super::WorkoutSource;
use crate::config::RunningAheadConfig;
use crate::error::{AppError, Result};
use crate::models::Workout;
use crate::runningahead::types::WorkoutsResponse;
use crate::secrets::Secrets;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

// Date, activity, workout type, time of day, distance, duration, course
const WORKOUT_FIELDS: [u32; 7] = [10, 11, 12, 13, 20, 21, 22];

pub struct RunningAheadClient {
    client: Client,
    access_token: String,
    workouts_url: String,
}

impl RunningAheadClient {
    /// Build a client using the access token stored under the configured key
    /// in the secrets file.
    pub fn new(config: &RunningAheadConfig, secrets: &Secrets) -> Result<Self> {
        let access_token = secrets.get(&config.token_key)?.to_string();
        let timeout = Duration::from_secs(config.timeout_secs);

        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            access_token,
            workouts_url: config.workouts_url(),
        })
    }

    /// GET for the workout list carrying the token and the field selector.
    fn workouts_request(&self) -> Result<reqwest::Request> {
        let fields: Vec<(&str, u32)> = WORKOUT_FIELDS.iter().map(|f| ("fields", *f)).collect();

        let request = self
            .client
            .get(&self.workouts_url)
            .query(&[("access_token", self.access_token.as_str())])
            .query(&fields)
            .build()?;

        Ok(request)
    }
}

/// The API lists entries newest first, so the head of the list is the most
/// recent workout.
fn most_recent(response: WorkoutsResponse) -> Result<Workout> {
    response
        .data
        .entries
        .into_iter()
        .next()
        .map(Into::into)
        .ok_or_else(|| AppError::RunningAhead("Workout log has no entries".to_string()))
}

#[async_trait]
impl WorkoutSource for RunningAheadClient {
    #[instrument(name = "Fetching latest workout", skip_all)]
    async fn latest_workout(&self) -> Result<Workout> {
        let request = self.workouts_request()?;
        let response = self.client.execute(request).await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RunningAhead(format!(
                "Failed to list workouts: {} - {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let workouts: WorkoutsResponse = serde_json::from_str(&body)?;
        debug!(entries = workouts.data.entries.len(), "Fetched workout log");

        most_recent(workouts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<Workout> {
        let response: WorkoutsResponse = serde_json::from_str(body)?;
        most_recent(response)
    }

    #[test]
    fn test_most_recent_is_first_entry() {
        let workout = parse(
            r#"{"data": {"entries": [
                {"date": "2021-05-10", "activityName": "Run"},
                {"date": "2021-05-12", "activityName": "Bike"}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(workout.date.as_deref(), Some("2021-05-10"));
        assert_eq!(workout.activity.as_deref(), Some("Run"));
    }

    #[test]
    fn test_fractional_duration_does_not_fail_parse() {
        let workout = parse(
            r#"{"data": {"entries": [
                {"date": "2021-05-10", "activityName": "Run",
                 "details": {"distance": {"value": 5.5}, "duration": 1865.4}}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(workout.date.as_deref(), Some("2021-05-10"));
        assert_eq!(workout.distance, Some(5.5));
        assert_eq!(workout.duration_secs, Some(1865));
    }

    #[test]
    fn test_empty_entries() {
        let err = parse(r#"{"data": {"entries": []}}"#).unwrap_err();
        assert!(matches!(err, AppError::RunningAhead(_)), "got {:?}", err);
    }

    #[test]
    fn test_missing_entries_key() {
        let err = parse(r#"{"data": {}}"#).unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)), "got {:?}", err);

        let err = parse(r#"{"status": 401}"#).unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)), "got {:?}", err);
    }

    #[test]
    fn test_missing_token_secret() {
        let secrets = Secrets::from_json(r#"{"someone_else": "abc"}"#).unwrap();
        let result = RunningAheadClient::new(&RunningAheadConfig::default(), &secrets);

        match result {
            Err(AppError::MissingSecret(key)) => assert_eq!(key, "runningahead_token"),
            Err(e) => panic!("expected MissingSecret, got {:?}", e),
            Ok(_) => panic!("expected MissingSecret, got a client"),
        }
    }

    #[test]
    fn test_new_with_token() {
        let secrets = Secrets::from_json(r#"{"runningahead_token": "abc"}"#).unwrap();
        let client = RunningAheadClient::new(&RunningAheadConfig::default(), &secrets).unwrap();

        assert_eq!(client.access_token, "abc");
        assert_eq!(
            client.workouts_url,
            "https://api.runningahead.com/rest/logs/me/workouts"
        );
    }

    #[test]
    fn test_workouts_request() {
        let secrets = Secrets::from_json(r#"{"runningahead_token": "abc"}"#).unwrap();
        let client = RunningAheadClient::new(&RunningAheadConfig::default(), &secrets).unwrap();

        let request = client.workouts_request().unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/rest/logs/me/workouts");
        assert_eq!(
            request.url().query(),
            Some("access_token=abc&fields=10&fields=11&fields=12&fields=13&fields=20&fields=21&fields=22")
        );
    }
}
