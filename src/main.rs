use anyhow::{Context, Result};
use better_times::aggregate::load_opening_times;
use better_times::catalog::{ActivitySelection, list_venues, load_activity_selection};
use better_times::client::BetterClient;
use better_times::config::Config;
use better_times::format::OpeningTimes;
use better_times::model::Venue;
use better_times::pipeline::OpeningTimesRequest;
use serde::Serialize;
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: better-times [--json] [<venue> [<activity>]]";

enum View {
    Venues,
    Activities(String),
    Times(OpeningTimesRequest),
}

fn parse_args(args: &[String]) -> Option<(View, bool)> {
    let json = args.iter().any(|a| a == "--json");
    let positional: Vec<&String> = args.iter().filter(|a| *a != "--json").collect();
    let view = match positional.as_slice() {
        [] => View::Venues,
        [venue] => View::Activities(venue.to_string()),
        [venue, activity] => View::Times(OpeningTimesRequest::new(*venue, *activity)),
        _ => return None,
    };
    Some((view, json))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    }
    let Some((view, json)) = parse_args(&args) else {
        eprintln!("{USAGE}");
        return Ok(ExitCode::from(2));
    };

    let config = Config::load().context("loading configuration")?;
    let tz = config.tz()?;
    let client = Arc::new(BetterClient::from_config(&config)?);

    match view {
        View::Venues => match list_venues(client.as_ref()).await {
            Ok(venues) => emit(&venues, json, render_venues),
            Err(_) => fail("Failed to load venues"),
        },
        View::Activities(venue) => {
            match load_activity_selection(client.as_ref(), &venue, config.category_concurrency)
                .await
            {
                Ok(selection) => emit(&selection, json, render_selection),
                Err(_) => fail("Failed to load activity details"),
            }
        }
        View::Times(request) => match load_opening_times(client, &request, tz).await {
            Ok(times) => emit(&times, json, render_times),
            Err(_) => fail("Failed to load times"),
        },
    }
}

fn emit<T: Serialize>(value: &T, json: bool, render: fn(&T) -> String) -> Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", render(value));
    }
    Ok(ExitCode::SUCCESS)
}

// Details were already logged where the failure happened
fn fail(message: &str) -> Result<ExitCode> {
    eprintln!("{message}");
    Ok(ExitCode::FAILURE)
}

fn render_venues(venues: &Vec<Venue>) -> String {
    venues
        .iter()
        .map(|v| format!("{:<32} {}\n", v.slug, v.name))
        .collect()
}

fn render_selection(selection: &ActivitySelection) -> String {
    let mut out = format!("{}\n", selection.venue.name);
    for activity in &selection.activities {
        out.push_str(&format!("  {}\n", activity.name));
        for child in &activity.children {
            out.push_str(&format!("    {:<28} {}\n", child.slug, child.name));
        }
    }
    out
}

fn render_times(times: &OpeningTimes) -> String {
    let mut out = format!("{} - {}\n", times.venue.name, times.activity.name);
    for date in &times.dates {
        out.push_str(&format!("\n{}\n", date.date));
        if date.times.is_empty() {
            out.push_str("  no availability\n");
        }
        for window in &date.times {
            out.push_str(&format!("  {} - {}\n", window.start, window.end));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use better_times::format::{DateAvailability, TimeWindow};
    use better_times::model::Activity;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn routes_by_argument_count() {
        assert!(matches!(parse_args(&args(&[])), Some((View::Venues, false))));
        assert!(matches!(
            parse_args(&args(&["centre", "--json"])),
            Some((View::Activities(v), true)) if v == "centre"
        ));
        assert!(matches!(
            parse_args(&args(&["centre", "swim"])),
            Some((View::Times(r), false)) if r == OpeningTimesRequest::new("centre", "swim")
        ));
        assert!(parse_args(&args(&["a", "b", "c"])).is_none());
    }

    #[test]
    fn renders_empty_dates() {
        let times = OpeningTimes {
            dates: vec![
                DateAvailability {
                    date: "Monday".into(),
                    times: vec![TimeWindow {
                        start: "07:00".into(),
                        end: "09:30".into(),
                    }],
                },
                DateAvailability {
                    date: "Tuesday".into(),
                    times: vec![],
                },
            ],
            venue: Venue {
                name: "Centre".into(),
                slug: "centre".into(),
            },
            activity: Activity {
                name: "Swim".into(),
                slug: "swim".into(),
                children: vec![],
            },
        };
        assert_eq!(
            render_times(&times),
            "Centre - Swim\n\nMonday\n  07:00 - 09:30\n\nTuesday\n  no availability\n"
        );
    }
}
