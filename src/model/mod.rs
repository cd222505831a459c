// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod duration;
pub mod range;
pub mod slot;

pub use duration::parse_duration_secs;
pub use range::{Range, RangeSet};
pub use slot::{
    Activity, ActivitySummary, DateToken, Envelope, RawSlot, SlotPayload, Venue,
};
