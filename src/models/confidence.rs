//! Forecast confidence from fit quality, data span and sample size.

use crate::core::{ConfidenceThresholds, RawRecord};
use crate::error::{PredictionError, Result};
use crate::validation::filter_invalid_historical_data;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical reliability of a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("low"),
            Self::Medium => f.write_str("medium"),
            Self::High => f.write_str("high"),
        }
    }
}

/// Maps (point count, R², span) to a [`ConfidenceLevel`].
///
/// All tier boundaries are exclusive, so a value sitting exactly on a
/// threshold falls to the lower tier.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceClassifier {
    thresholds: ConfidenceThresholds,
}

impl ConfidenceClassifier {
    pub fn new(thresholds: ConfidenceThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ConfidenceThresholds {
        &self.thresholds
    }

    /// Classify using the number of valid records in `history`.
    pub fn classify(
        &self,
        history: &[RawRecord],
        r_squared: f64,
        data_span_years: f64,
    ) -> Result<ConfidenceLevel> {
        let point_count = filter_invalid_historical_data(history).valid_data.len();
        self.classify_counts(point_count, r_squared, data_span_years)
    }

    /// Classify from an already known point count.
    pub fn classify_counts(
        &self,
        point_count: usize,
        r_squared: f64,
        data_span_years: f64,
    ) -> Result<ConfidenceLevel> {
        if !(0.0..=1.0).contains(&r_squared) {
            return Err(PredictionError::RangeViolation {
                parameter: "rSquared".to_string(),
                actual: r_squared,
                expected: "a value within [0, 1]".to_string(),
            });
        }
        if !(data_span_years >= 0.0) {
            return Err(PredictionError::RangeViolation {
                parameter: "dataSpanYears".to_string(),
                actual: data_span_years,
                expected: "a non-negative number of years".to_string(),
            });
        }

        let t = &self.thresholds;
        let level = if r_squared > t.high_r_squared
            && data_span_years > t.high_span_years
            && point_count >= t.high_min_points
            && data_span_years > t.medium_span_years
        {
            ConfidenceLevel::High
        } else if r_squared > t.medium_r_squared && data_span_years > t.medium_span_years {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        };

        Ok(level)
    }
}

/// Classify with the default thresholds.
pub fn calculate_confidence(
    history: &[RawRecord],
    r_squared: f64,
    data_span_years: f64,
) -> Result<ConfidenceLevel> {
    ConfidenceClassifier::default().classify(history, r_squared, data_span_years)
}
