//! # groundwater-forecast
//!
//! Forecasting and statistics engine for sparse groundwater depth records.
//!
//! Given a location's measurement history and a fitted regression line, the
//! engine validates the input, extrapolates depths to fixed horizons, estimates
//! when the area's stress category will worsen, projects the next two
//! pre-/post-monsoon seasons, and grades forecast confidence.
//!
//! Every operation is a pure, synchronous function of its arguments and an
//! immutable [`core::EngineConfig`], so components can be shared freely across
//! threads.
//!
//! ```
//! use groundwater_forecast::prelude::*;
//! use chrono::NaiveDate;
//!
//! let history: Vec<RawRecord> = (0..4)
//!     .map(|i| RawRecord::new(NaiveDate::from_ymd_opt(2020 + i, 4, 1).unwrap(), 8.0 + 0.4 * i as f64))
//!     .collect();
//!
//! let outcome = validate_prediction_inputs(&history, 0.4, 8.0, &QualityRequirements::default());
//! assert!(outcome.is_valid);
//!
//! let base = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
//! let levels = compute_future_water_levels(&history, 0.4, 8.0, base).unwrap();
//! assert_eq!(levels.predictions[0].predicted_level, 8.4);
//! ```

pub mod core;
pub mod error;
pub mod models;
pub mod utils;
pub mod validation;

pub use error::{PredictionError, Result};

pub mod prelude {
    pub use crate::core::{EngineConfig, HistoricalRecord, RawRecord, Season, StressCategory};
    pub use crate::error::{PredictionError, Result};
    pub use crate::models::{
        calculate_confidence, compute_future_water_levels, predict_seasonal_levels,
        predict_stress_category_transition, ConfidenceLevel,
    };
    pub use crate::utils::{calculate_r_squared, calculate_standard_error};
    pub use crate::validation::{validate_prediction_inputs, QualityRequirements};
}
