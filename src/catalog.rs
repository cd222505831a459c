// File: ./src/catalog.rs
// Venue and activity listings shown before a specific activity is picked
use crate::client::ActivityApi;
use crate::error::{Error, Result};
use crate::model::{Activity, ActivitySummary, Venue};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::error;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivitySelection {
    pub venue: Venue,
    /// Sorted by name.
    pub activities: Vec<Activity>,
}

pub async fn list_venues<A: ActivityApi + ?Sized>(api: &A) -> Result<Vec<Venue>> {
    api.venues().await
}

/// Loads the venue and the details of every activity category it offers.
///
/// At most `concurrency` category lookups are in flight at once. Any failure
/// fails the whole selection once the in-flight lookups have finished.
pub async fn load_activity_selection<A: ActivityApi + ?Sized>(
    api: &A,
    venue: &str,
    concurrency: usize,
) -> Result<ActivitySelection> {
    let activities = async {
        let categories = api.categories(venue).await?;
        let lookups = categories
            .into_iter()
            .map(move |summary| category_details(api, venue, summary));
        let mut stream = stream::iter(lookups).buffer_unordered(concurrency.max(1));

        let mut activities = Vec::new();
        let mut first_error = None;
        while let Some(res) = stream.next().await {
            match res {
                Ok(activity) => activities.push(activity),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }
        activities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok::<_, Error>(activities)
    };

    let (venue_details, activities) = tokio::join!(api.venue(venue), activities);

    match (venue_details, activities) {
        (Ok(venue), Ok(activities)) => Ok(ActivitySelection { venue, activities }),
        (Err(e), _) | (_, Err(e)) => {
            error!(%venue, error = %e, "failed to load activity selection");
            Err(Error::aggregate(e))
        }
    }
}

async fn category_details<A: ActivityApi + ?Sized>(
    api: &A,
    venue: &str,
    summary: ActivitySummary,
) -> Result<Activity> {
    let details = api.activity(venue, &summary.slug).await?;
    if !details.children.is_empty() {
        return Ok(details);
    }
    Ok(Activity {
        name: summary.name.clone(),
        slug: summary.slug.clone(),
        children: vec![summary],
    })
}
