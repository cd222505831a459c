// File: ./src/model/range.rs
// Streaming consolidation of sorted time ranges
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A closed span `[start, end]` in epoch seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: i64,
    pub end: i64,
}

impl Range {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }
}

/// Ordered, disjoint ranges. Touching ranges are merged into one.
///
/// Ranges must be added in non-decreasing `start` order; the set only ever
/// looks at its last element, so it never re-sorts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RangeSet {
    ranges: Vec<Range>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, range: Range) -> Result<()> {
        if let Some(last) = self.ranges.last_mut() {
            if range.start < last.start {
                return Err(Error::OutOfOrder {
                    start: range.start,
                    last_start: last.start,
                });
            }
            if range.start <= last.end {
                last.end = last.end.max(range.end);
                return Ok(());
            }
        }
        self.ranges.push(range);
        Ok(())
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl IntoIterator for RangeSet {
    type Item = Range;
    type IntoIter = std::vec::IntoIter<Range>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.into_iter()
    }
}
