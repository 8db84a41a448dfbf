mod client;
pub mod types;
pub use client::RunningAheadClient;

use crate::error::Result;
use crate::models::Workout;

use async_trait::async_trait;

#[async_trait]
pub trait WorkoutSource {
    /// The most recent entry in the workout log.
    async fn latest_workout(&self) -> Result<Workout>;
}
