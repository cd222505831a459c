// File: ./src/aggregate.rs
// Concurrent per-date loading with all-or-nothing results
use crate::client::ActivityApi;
use crate::error::{Error, Result};
use crate::format::OpeningTimes;
use crate::model::{Activity, DateToken, RangeSet, Venue};
use crate::pipeline::{OpeningTimesRequest, load_date_ranges};
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error};

/// Only the first three weeks of dates are shown.
pub const MAX_DATES: usize = 21;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aggregation {
    /// In the order the upstream listed the dates.
    pub dates: Vec<(DateToken, RangeSet)>,
    pub venue: Venue,
    pub activity: Activity,
}

enum TaskOutput {
    Date(usize, RangeSet),
    Venue(Venue),
    Activity(Activity),
}

/// Loads venue details, activity details and every date's ranges concurrently.
///
/// Every spawned task is joined before returning, even after a failure, and a
/// failure does not cancel its siblings. The first failure observed is
/// returned as [`Error::Aggregate`] and all partial results are dropped.
pub async fn aggregate<A>(api: Arc<A>, request: &OpeningTimesRequest) -> Result<Aggregation>
where
    A: ActivityApi + ?Sized + 'static,
{
    let mut tasks: JoinSet<Result<TaskOutput>> = JoinSet::new();

    {
        let api = api.clone();
        let venue = request.venue.clone();
        tasks.spawn(async move { api.venue(&venue).await.map(TaskOutput::Venue) });
    }
    {
        let api = api.clone();
        let request = request.clone();
        tasks.spawn(async move {
            api.activity(&request.venue, &request.activity)
                .await
                .map(|a| TaskOutput::Activity(a.with_self_as_child()))
        });
    }

    let mut first_error = None;
    let dates = match api.dates(&request.venue, &request.activity).await {
        Ok(mut dates) => {
            dates.truncate(MAX_DATES);
            dates
        }
        Err(e) => {
            first_error = Some(e);
            Vec::new()
        }
    };

    for (index, date) in dates.iter().cloned().enumerate() {
        let api = api.clone();
        let request = request.clone();
        tasks.spawn(async move {
            load_date_ranges(api.as_ref(), &request, &date)
                .await
                .map(|ranges| TaskOutput::Date(index, ranges))
        });
    }
    debug!(
        venue = %request.venue,
        activity = %request.activity,
        dates = dates.len(),
        "waiting for tasks"
    );

    let mut slots: Vec<Option<RangeSet>> = (0..dates.len()).map(|_| None).collect();
    let mut venue = None;
    let mut activity = None;

    while let Some(joined) = tasks.join_next().await {
        match joined.map_err(Error::from).and_then(|output| output) {
            Ok(TaskOutput::Date(index, ranges)) => slots[index] = Some(ranges),
            Ok(TaskOutput::Venue(v)) => venue = Some(v),
            Ok(TaskOutput::Activity(a)) => activity = Some(a),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    if let Some(e) = first_error {
        error!(
            venue = %request.venue,
            activity = %request.activity,
            error = %e,
            "failed to load opening times"
        );
        return Err(e.aggregate());
    }

    let (Some(venue), Some(activity)) = (venue, activity) else {
        return Err(Error::Task("venue or activity lookup produced no result".into()).aggregate());
    };
    let dates = dates
        .into_iter()
        .zip(slots)
        .map(|(date, ranges)| ranges.map(|r| (date, r)))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| Error::Task("a date produced no result".into()).aggregate())?;

    Ok(Aggregation {
        dates,
        venue,
        activity,
    })
}

/// [`aggregate`] followed by formatting in `tz`.
pub async fn load_opening_times<A>(
    api: Arc<A>,
    request: &OpeningTimesRequest,
    tz: Tz,
) -> Result<OpeningTimes>
where
    A: ActivityApi + ?Sized + 'static,
{
    let aggregation = aggregate(api, request).await?;
    Ok(OpeningTimes::from_aggregation(aggregation, tz))
}
