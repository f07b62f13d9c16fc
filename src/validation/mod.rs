//! Input validation and the data-quality gate.
//!
//! Helpers here report structured verdicts instead of failing, so callers can
//! aggregate problems before deciding whether to run a predictor.
//!
//! # Example
//!
//! ```
//! use groundwater_forecast::core::RawRecord;
//! use groundwater_forecast::validation::{validate_prediction_inputs, QualityRequirements};
//! use chrono::NaiveDate;
//!
//! let history: Vec<RawRecord> = (0..4)
//!     .map(|i| RawRecord::new(NaiveDate::from_ymd_opt(2020 + i, 3, 1).unwrap(), 5.0 + i as f64))
//!     .collect();
//! let outcome = validate_prediction_inputs(&history, 1.0, 5.0, &QualityRequirements::default());
//! assert!(outcome.is_valid);
//! assert_eq!(outcome.metrics.data_points, 4);
//! ```

pub mod filter;
pub mod quality;

pub use filter::{check_finite, filter_invalid_historical_data, validate_date, FilterOutcome};
pub use quality::{
    check_data_quality, validate_prediction_inputs, validate_regression_parameters,
    validate_seasonal_data, DataMetrics, ParameterCheck, QualityReport, QualityRequirements,
    SeasonalCheck, ValidationOutcome,
};
