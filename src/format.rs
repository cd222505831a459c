// File: ./src/format.rs
// Display strings for consolidated ranges
use crate::aggregate::Aggregation;
use crate::model::{Activity, RangeSet, Venue};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DateAvailability {
    pub date: String,
    pub times: Vec<TimeWindow>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OpeningTimes {
    pub dates: Vec<DateAvailability>,
    pub venue: Venue,
    pub activity: Activity,
}

/// 24-hour wall-clock time of `ts` in `tz`.
pub fn clock_time(ts: i64, tz: Tz) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.with_timezone(&tz).format("%H:%M").to_string())
        .unwrap_or_default()
}

pub fn format_ranges(ranges: &RangeSet, tz: Tz) -> Vec<TimeWindow> {
    ranges
        .ranges()
        .iter()
        .map(|r| TimeWindow {
            start: clock_time(r.start, tz),
            end: clock_time(r.end, tz),
        })
        .collect()
}

impl OpeningTimes {
    pub fn from_aggregation(aggregation: Aggregation, tz: Tz) -> Self {
        let dates = aggregation
            .dates
            .into_iter()
            .map(|(date, ranges)| DateAvailability {
                date: date.display_label,
                times: format_ranges(&ranges, tz),
            })
            .collect();

        Self {
            dates,
            venue: aggregation.venue,
            activity: aggregation.activity,
        }
    }
}
