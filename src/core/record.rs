//! Measurement records, raw and validated.

use crate::error::{PredictionError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unit attached to every depth value the engine emits.
pub const LEVEL_UNIT: &str = "meters below ground level";

/// A measurement that survived filtering: a real calendar date and a finite depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalRecord {
    pub date: NaiveDate,
    /// Depth to water in meters below ground level.
    pub water_level: f64,
}

impl HistoricalRecord {
    pub fn new(date: NaiveDate, water_level: f64) -> Self {
        Self { date, water_level }
    }
}

/// Water-level field as it arrives from an upstream source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLevel {
    Number(f64),
    Text(String),
    Other(Value),
}

/// An unvalidated measurement. Either field may be absent or malformed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub water_level: Option<RawLevel>,
}

impl RawRecord {
    /// Build a well-formed raw record from typed values.
    pub fn new(date: NaiveDate, water_level: f64) -> Self {
        Self {
            date: Some(date.format("%Y-%m-%d").to_string()),
            water_level: Some(RawLevel::Number(water_level)),
        }
    }

    /// Build a raw record from arbitrary text fields, as a form or CSV would supply them.
    pub fn from_parts(date: Option<&str>, water_level: Option<RawLevel>) -> Self {
        Self {
            date: date.map(str::to_string),
            water_level,
        }
    }
}

impl From<HistoricalRecord> for RawRecord {
    fn from(record: HistoricalRecord) -> Self {
        Self::new(record.date, record.water_level)
    }
}

impl From<&HistoricalRecord> for RawRecord {
    fn from(record: &HistoricalRecord) -> Self {
        Self::new(record.date, record.water_level)
    }
}

/// Parse a date string into a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (reduced to their UTC calendar
/// date) and naive `YYYY-MM-DDTHH:MM:SS[.f]` timestamps.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
}

/// Convert a JSON payload into raw records.
///
/// Non-object elements become empty records so that filtering can count and
/// report them; only a non-array payload is rejected outright.
pub fn parse_history(payload: &Value) -> Result<Vec<RawRecord>> {
    let items = payload
        .as_array()
        .ok_or_else(|| PredictionError::TypeMismatch {
            parameter: "history".to_string(),
            expected: "an array of {date, waterLevel} records".to_string(),
            actual: json_type_name(payload).to_string(),
        })?;

    Ok(items.iter().map(raw_record_from_json).collect())
}

fn raw_record_from_json(item: &Value) -> RawRecord {
    let Some(obj) = item.as_object() else {
        return RawRecord::default();
    };

    let date = match obj.get("date") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    };

    let water_level = match obj.get("waterLevel").or_else(|| obj.get("water_level")) {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64().map(RawLevel::Number),
        Some(Value::String(s)) => Some(RawLevel::Text(s.clone())),
        Some(other) => Some(RawLevel::Other(other.clone())),
    };

    RawRecord { date, water_level }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
