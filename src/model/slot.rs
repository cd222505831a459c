// File: ./src/model/slot.rs
// Records exchanged with the upstream booking API
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every upstream response wraps its payload in `{"data": ...}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub slug: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub name: String,
    pub slug: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub children: Vec<ActivitySummary>,
}

impl Activity {
    /// Activities without sub-activities are bookable as themselves.
    pub fn with_self_as_child(mut self) -> Self {
        if self.children.is_empty() {
            self.children.push(ActivitySummary {
                name: self.name.clone(),
                slug: self.slug.clone(),
            });
        }
        self
    }
}

/// One calendar date offered for an activity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateToken {
    #[serde(rename = "raw")]
    pub raw_id: String,
    #[serde(rename = "full_date_pretty")]
    pub display_label: String,
}

/// One bookable slot as returned for a date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSlot {
    #[serde(rename = "duration")]
    pub duration_label: String,
    #[serde(rename = "timestamp")]
    pub start_timestamp: i64,
}

/// The times endpoint returns either a list of slots or an object keyed by
/// slot id. The keys carry no meaning.
#[derive(Debug, Deserialize)]
#[serde(try_from = "Value")]
pub struct SlotPayload(Vec<RawSlot>);

impl SlotPayload {
    pub fn into_slots(self) -> Vec<RawSlot> {
        self.0
    }
}

impl TryFrom<Value> for SlotPayload {
    type Error = String;

    // Each slot is decoded on its own so a failure names the slot and field
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let entries: Vec<(String, Value)> = match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item))
                .collect(),
            Value::Object(map) => map.into_iter().collect(),
            other => {
                return Err(format!(
                    "expected a list or map of slots, got {}",
                    json_kind(&other)
                ));
            }
        };

        entries
            .into_iter()
            .map(|(key, item)| {
                serde_json::from_value(item).map_err(|e| format!("slot {key}: {e}"))
            })
            .collect::<Result<Vec<RawSlot>, String>>()
            .map(SlotPayload)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
