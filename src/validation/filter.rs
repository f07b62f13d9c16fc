//! Record filtering and scalar input checks.

use crate::core::{json_type_name, parse_date, HistoricalRecord, RawLevel, RawRecord};
use crate::error::{NonFinite, PredictionError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use std::any::Any;

/// Records that survived filtering plus an account of those that did not.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// Valid records in input order.
    pub valid_data: Vec<HistoricalRecord>,
    pub invalid_count: usize,
    /// One reason per dropped record.
    pub errors: Vec<String>,
}

/// Drop records with an unparseable date or a missing/non-numeric/non-finite level.
///
/// `valid_data.len() + invalid_count == history.len()` always holds, and
/// surviving records keep their relative order.
pub fn filter_invalid_historical_data(history: &[RawRecord]) -> FilterOutcome {
    let mut valid_data = Vec::with_capacity(history.len());
    let mut errors = Vec::new();

    for (index, record) in history.iter().enumerate() {
        match check_record(record) {
            Ok(valid) => valid_data.push(valid),
            Err(reason) => errors.push(format!("Record {index}: {reason}")),
        }
    }

    let invalid_count = errors.len();
    if invalid_count > 0 {
        tracing::warn!(
            dropped = invalid_count,
            total = history.len(),
            "Dropped invalid historical records"
        );
    }

    FilterOutcome {
        valid_data,
        invalid_count,
        errors,
    }
}

fn check_record(record: &RawRecord) -> std::result::Result<HistoricalRecord, String> {
    let date = match record.date.as_deref() {
        None => return Err("date is missing".to_string()),
        Some(text) => parse_date(text)
            .ok_or_else(|| format!("date '{text}' is not a valid calendar date"))?,
    };

    let water_level = match &record.water_level {
        None => return Err("water level is missing (null)".to_string()),
        Some(RawLevel::Text(text)) => {
            return Err(format!("water level '{text}' is not numeric (got text)"))
        }
        Some(RawLevel::Other(value)) => {
            return Err(format!(
                "water level is not numeric (got {})",
                json_type_name(value)
            ))
        }
        Some(RawLevel::Number(value)) => match NonFinite::classify(*value) {
            Some(reason) => return Err(format!("water level is {reason}")),
            None => *value,
        },
    };

    Ok(HistoricalRecord { date, water_level })
}

/// True only for chrono date or date-time values.
///
/// Strings, numbers and any other type are rejected; parse them first.
pub fn validate_date(value: &dyn Any) -> bool {
    value.is::<NaiveDate>()
        || value.is::<NaiveDateTime>()
        || value.is::<DateTime<Utc>>()
        || value.is::<DateTime<FixedOffset>>()
}

/// Require a finite number, describing exactly why a value was rejected.
pub fn check_finite(parameter: &str, value: f64) -> Result<f64> {
    match NonFinite::classify(value) {
        Some(reason) => Err(PredictionError::NotFinite {
            parameter: parameter.to_string(),
            reason,
        }),
        None => Ok(value),
    }
}
