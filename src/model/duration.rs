// File: ./src/model/duration.rs
// Parses slot duration labels such as "45min"
use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)min").expect("duration pattern is valid"));

/// Returns the duration of a slot label in seconds.
///
/// Only minute labels are understood; the first `<digits>min` run in the
/// label wins.
pub fn parse_duration_secs(label: &str) -> Result<i64> {
    let digits = DURATION_RE
        .captures(label)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| Error::Format(label.to_string()))?;

    let minutes: i64 = digits
        .as_str()
        .parse()
        .map_err(|_| Error::Format(label.to_string()))?;

    minutes
        .checked_mul(60)
        .ok_or_else(|| Error::Format(label.to_string()))
}
