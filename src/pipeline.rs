// File: ./src/pipeline.rs
// Turns one date's raw slots into consolidated opening ranges
use crate::client::ActivityApi;
use crate::error::{Error, Result};
use crate::model::{DateToken, Range, RangeSet, RawSlot, parse_duration_secs};
use chrono::DateTime;
use tracing::warn;

/// Identifies the venue/activity pair a request is about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpeningTimesRequest {
    pub venue: String,
    pub activity: String,
}

impl OpeningTimesRequest {
    pub fn new(venue: impl Into<String>, activity: impl Into<String>) -> Self {
        Self {
            venue: venue.into(),
            activity: activity.into(),
        }
    }
}

/// Fetches the slots for `date` and consolidates them.
pub async fn load_date_ranges<A: ActivityApi + ?Sized>(
    api: &A,
    request: &OpeningTimesRequest,
    date: &DateToken,
) -> Result<RangeSet> {
    let slots = api
        .times(&request.venue, &request.activity, date)
        .await?;
    consolidate(slots).inspect_err(|e| {
        warn!(date = %date.raw_id, error = %e, "failed to consolidate times");
    })
}

/// Sorts slots by start and merges them into disjoint ranges.
/// No slots means no availability, which is not an error.
pub fn consolidate(mut slots: Vec<RawSlot>) -> Result<RangeSet> {
    slots.sort_by_key(|s| s.start_timestamp);

    let mut ranges = RangeSet::new();
    for slot in slots {
        let duration = parse_duration_secs(&slot.duration_label)?;
        let start = displayable(slot.start_timestamp)?;
        let end = start
            .checked_add(duration)
            .ok_or(Error::Timestamp(start))
            .and_then(displayable)?;
        ranges.add(Range::new(start, end))?;
    }
    Ok(ranges)
}

fn displayable(ts: i64) -> Result<i64> {
    DateTime::from_timestamp(ts, 0)
        .map(|_| ts)
        .ok_or(Error::Timestamp(ts))
}
