// File: ./src/client/api.rs
// The upstream booking API as seen by the aggregation code
use crate::error::Result;
use crate::model::{Activity, ActivitySummary, DateToken, RawSlot, Venue};
use async_trait::async_trait;

#[async_trait]
pub trait ActivityApi: Send + Sync {
    async fn venues(&self) -> Result<Vec<Venue>>;

    async fn venue(&self, venue: &str) -> Result<Venue>;

    async fn categories(&self, venue: &str) -> Result<Vec<ActivitySummary>>;

    /// Raw category details; `children` may be empty.
    async fn activity(&self, venue: &str, activity: &str) -> Result<Activity>;

    /// Bookable dates, oldest first.
    async fn dates(&self, venue: &str, activity: &str) -> Result<Vec<DateToken>>;

    /// Slots for one date, flattened from whichever shape the API used.
    /// Order is unspecified.
    async fn times(&self, venue: &str, activity: &str, date: &DateToken) -> Result<Vec<RawSlot>>;
}
