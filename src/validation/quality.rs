//! Data-quality gate: point counts, data span and composite input validation.

use crate::core::{HistoricalRecord, RawRecord, RechargeEntry};
use crate::validation::filter::{check_finite, filter_invalid_historical_data};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DAYS_PER_YEAR: f64 = 365.25;

/// Minimum requirements a data set must meet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityRequirements {
    pub min_points: usize,
    pub min_span_years: f64,
}

impl Default for QualityRequirements {
    fn default() -> Self {
        Self {
            min_points: 3,
            min_span_years: 0.0,
        }
    }
}

impl QualityRequirements {
    pub fn new(min_points: usize, min_span_years: f64) -> Self {
        Self {
            min_points,
            min_span_years,
        }
    }
}

/// Size and extent of a data set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataMetrics {
    pub data_points: usize,
    pub data_span_years: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DataMetrics {
    /// Measure a data set. Span is zero for fewer than two records.
    pub fn measure(data: &[HistoricalRecord]) -> Self {
        let start_date = data.iter().map(|r| r.date).min();
        let end_date = data.iter().map(|r| r.date).max();
        let data_span_years = match (start_date, end_date) {
            (Some(start), Some(end)) => (end - start).num_days() as f64 / DAYS_PER_YEAR,
            _ => 0.0,
        };

        Self {
            data_points: data.len(),
            data_span_years,
            start_date,
            end_date,
        }
    }
}

/// Pass/fail verdict from [`check_data_quality`].
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub metrics: DataMetrics,
}

/// Verdict for a pair of regression parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterCheck {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Composite verdict from [`validate_prediction_inputs`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    /// Surviving records in chronological order.
    pub valid_data: Vec<HistoricalRecord>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub metrics: DataMetrics,
}

/// Verdict from [`validate_seasonal_data`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalCheck {
    pub is_valid: bool,
    pub complete_cycles: usize,
    pub errors: Vec<String>,
}

/// Check point count and data span against `requirements`.
pub fn check_data_quality(
    data: &[HistoricalRecord],
    requirements: &QualityRequirements,
) -> QualityReport {
    let metrics = DataMetrics::measure(data);
    let mut errors = Vec::new();

    if metrics.data_points < requirements.min_points {
        errors.push(format!(
            "Insufficient data: Found {} valid data point(s), {} are required.",
            metrics.data_points, requirements.min_points
        ));
    }
    if metrics.data_span_years < requirements.min_span_years {
        errors.push(format!(
            "Insufficient data span: records cover {:.2} year(s), at least {:.2} are required. \
             Include older measurements to widen the observation window.",
            metrics.data_span_years, requirements.min_span_years
        ));
    }

    QualityReport {
        is_valid: errors.is_empty(),
        errors,
        metrics,
    }
}

/// Both regression parameters must be finite. Never fails; collects one error per bad value.
pub fn validate_regression_parameters(slope: f64, intercept: f64) -> ParameterCheck {
    let errors: Vec<String> = [("slope", slope), ("intercept", intercept)]
        .into_iter()
        .filter_map(|(name, value)| check_finite(name, value).err())
        .map(|e| e.to_string())
        .collect();

    ParameterCheck {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Filter history, check regression parameters, then gate on quality.
pub fn validate_prediction_inputs(
    history: &[RawRecord],
    slope: f64,
    intercept: f64,
    requirements: &QualityRequirements,
) -> ValidationOutcome {
    let filtered = filter_invalid_historical_data(history);
    let params = validate_regression_parameters(slope, intercept);

    let mut valid_data = filtered.valid_data;
    valid_data.sort_by_key(|r| r.date);
    let quality = check_data_quality(&valid_data, requirements);

    let mut warnings = Vec::new();
    if filtered.invalid_count > 0 {
        warnings.push(format!(
            "Dropped {} of {} historical record(s) with an invalid date or water level.",
            filtered.invalid_count,
            history.len()
        ));
    }

    let mut errors = params.errors;
    errors.extend(quality.errors);

    ValidationOutcome {
        is_valid: errors.is_empty(),
        valid_data,
        errors,
        warnings,
        metrics: quality.metrics,
    }
}

/// Count years with both seasonal depths present and compare with `min_cycles`.
pub fn validate_seasonal_data(recharge_pattern: &[RechargeEntry], min_cycles: usize) -> SeasonalCheck {
    let complete_cycles = recharge_pattern.iter().filter(|e| e.is_complete()).count();
    let mut errors = Vec::new();

    if complete_cycles < min_cycles {
        errors.push(format!(
            "Found {complete_cycles} complete seasonal cycle(s), {min_cycles} are required. \
             Each cycle needs both a pre-monsoon and a post-monsoon reading in the same year."
        ));
    }

    SeasonalCheck {
        is_valid: errors.is_empty(),
        complete_cycles,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(y: i32, m: u32, level: f64) -> HistoricalRecord {
        HistoricalRecord::new(ymd(y, m, 1), level)
    }

    #[test]
    fn measures_span_from_unsorted_data() {
        let data = vec![record(2022, 1, 5.0), record(2020, 1, 4.0), record(2021, 1, 4.5)];
        let metrics = DataMetrics::measure(&data);
        assert_eq!(metrics.data_points, 3);
        assert_eq!(metrics.start_date, Some(ymd(2020, 1, 1)));
        assert_eq!(metrics.end_date, Some(ymd(2022, 1, 1)));
        assert_relative_eq!(metrics.data_span_years, 731.0 / 365.25, epsilon = 1e-12);
    }

    #[test]
    fn single_point_has_zero_span() {
        let metrics = DataMetrics::measure(&[record(2020, 1, 4.0)]);
        assert_eq!(metrics.data_span_years, 0.0);
        assert_eq!(DataMetrics::measure(&[]).start_date, None);
    }

    #[test]
    fn quality_checks_points_and_span() {
        let data = vec![record(2020, 1, 4.0), record(2020, 6, 4.1)];
        let report = check_data_quality(&data, &QualityRequirements::new(3, 1.0));
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("Found 2 valid data point(s), 3 are required"));
        assert!(report.errors[1].contains("span"));

        let report = check_data_quality(&data, &QualityRequirements::new(2, 0.0));
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn regression_parameters_collect_all_errors() {
        assert!(validate_regression_parameters(0.1, 5.0).is_valid);

        let check = validate_regression_parameters(f64::NAN, f64::NEG_INFINITY);
        assert!(!check.is_valid);
        assert_eq!(check.errors.len(), 2);
        assert!(check.errors[0].contains("slope"));
        assert!(check.errors[0].contains("NaN"));
        assert!(check.errors[1].contains("intercept"));
        assert!(check.errors[1].contains("negative infinity"));
    }

    #[test]
    fn composite_validation_sorts_and_warns() {
        let history = vec![
            RawRecord::new(ymd(2022, 1, 1), 6.0),
            RawRecord::from_parts(Some("nope"), None),
            RawRecord::new(ymd(2020, 1, 1), 5.0),
            RawRecord::new(ymd(2021, 1, 1), 5.5),
        ];
        let outcome =
            validate_prediction_inputs(&history, 0.5, 5.0, &QualityRequirements::default());
        assert!(outcome.is_valid);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("Dropped 1 of 4"));
        let dates: Vec<_> = outcome.valid_data.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![ymd(2020, 1, 1), ymd(2021, 1, 1), ymd(2022, 1, 1)]);
    }

    #[test]
    fn composite_validation_fails_on_any_stage() {
        let history = vec![
            RawRecord::new(ymd(2020, 1, 1), 5.0),
            RawRecord::new(ymd(2021, 1, 1), 5.5),
            RawRecord::new(ymd(2022, 1, 1), 6.0),
        ];
        let outcome =
            validate_prediction_inputs(&history, f64::NAN, 5.0, &QualityRequirements::default());
        assert!(!outcome.is_valid);
        assert_eq!(outcome.errors.len(), 1);

        let outcome = validate_prediction_inputs(
            &history[..2],
            0.1,
            5.0,
            &QualityRequirements::default(),
        );
        assert!(!outcome.is_valid);
        assert!(outcome.errors[0].contains("Found 2"));
    }

    #[test]
    fn seasonal_data_counts_complete_years() {
        let entry = |year, pre, post| RechargeEntry {
            year,
            pre_monsoon: pre,
            post_monsoon: post,
            recharge: None,
        };
        let pattern = vec![
            entry(2019, Some(8.0), Some(6.0)),
            entry(2020, Some(8.2), None),
            entry(2021, Some(8.4), Some(6.1)),
        ];
        let check = validate_seasonal_data(&pattern, 3);
        assert!(!check.is_valid);
        assert_eq!(check.complete_cycles, 2);
        assert!(check.errors[0].contains("Found 2 complete seasonal cycle(s), 3 are required"));

        assert!(validate_seasonal_data(&pattern, 2).is_valid);
    }
}
