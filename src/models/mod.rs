//! Forecasting models and classifiers.

pub mod confidence;
pub mod future_levels;
pub mod seasonal;
pub mod stress_transition;

pub use confidence::{calculate_confidence, ConfidenceClassifier, ConfidenceLevel};
pub use future_levels::{
    compute_future_water_levels, DataRange, FutureLevelForecast, FutureLevelForecaster,
    LevelPrediction,
};
pub use seasonal::{
    predict_seasonal_levels, recharge_pattern, SeasonProjection, SeasonalForecast,
    SeasonalForecaster,
};
pub use stress_transition::{
    predict_stress_category_transition, threshold_table, CategoryThreshold,
    StressTransitionEstimator, TransitionEstimate, TransitionWarning, Trend, WarningPriority,
};
