//! Engine configuration: horizons, rounding precisions and heuristic thresholds.

use crate::error::{PredictionError, Result};
use serde::{Deserialize, Serialize};

/// Thresholds used by the confidence classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceThresholds {
    /// R² must exceed this for `high`.
    pub high_r_squared: f64,
    /// Data span (years) must exceed this for `high`.
    pub high_span_years: f64,
    /// Minimum valid points for `high`.
    pub high_min_points: usize,
    /// R² must exceed this for `medium`.
    pub medium_r_squared: f64,
    /// Data span (years) must exceed this for `medium` (and `high`).
    pub medium_span_years: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high_r_squared: 0.7,
            high_span_years: 5.0,
            high_min_points: 20,
            medium_r_squared: 0.5,
            medium_span_years: 2.0,
        }
    }
}

/// Immutable configuration captured by each engine component.
///
/// Partial TOML documents are accepted; missing keys keep their defaults.
///
/// # Example
/// ```
/// use groundwater_forecast::core::EngineConfig;
///
/// let config = EngineConfig::from_toml_str("min_points = 5").unwrap();
/// assert_eq!(config.min_points, 5);
/// assert_eq!(config.horizon_years, vec![1, 2, 3, 5]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Forecast horizons in years, strictly ascending.
    pub horizon_years: Vec<u32>,
    /// Minimum valid records for any predictor.
    pub min_points: usize,
    /// Minimum years with both seasons present.
    pub min_seasonal_cycles: usize,
    /// Length of the seasonal averaging window, counted back from the latest record.
    pub seasonal_window_years: u32,
    pub level_decimals: u32,
    pub rate_decimals: u32,
    pub years_decimals: u32,
    /// Decline rates below this magnitude are treated as stable.
    pub stable_rate: f64,
    /// Safe-category rates below this fraction of its threshold are also stable.
    pub safe_stable_fraction: f64,
    pub min_transition_years: f64,
    pub max_transition_years: f64,
    /// Transition estimates at or under this many years carry a warning.
    pub warning_horizon_years: f64,
    pub confidence: ConfidenceThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizon_years: vec![1, 2, 3, 5],
            min_points: 3,
            min_seasonal_cycles: 3,
            seasonal_window_years: 5,
            level_decimals: 2,
            rate_decimals: 3,
            years_decimals: 1,
            stable_rate: 0.01,
            safe_stable_fraction: 0.5,
            min_transition_years: 0.5,
            max_transition_years: 20.0,
            warning_horizon_years: 5.0,
            confidence: ConfidenceThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document over the defaults and validate the result.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| PredictionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the forecast horizons.
    pub fn with_horizon_years(mut self, horizons: Vec<u32>) -> Self {
        self.horizon_years = horizons;
        self
    }

    /// Set the minimum number of valid points.
    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    /// Set the minimum number of complete seasonal cycles.
    pub fn with_min_seasonal_cycles(mut self, cycles: usize) -> Self {
        self.min_seasonal_cycles = cycles;
        self
    }

    /// Set the seasonal averaging window in years.
    pub fn with_seasonal_window_years(mut self, years: u32) -> Self {
        self.seasonal_window_years = years;
        self
    }

    /// Set the confidence thresholds.
    pub fn with_confidence(mut self, thresholds: ConfidenceThresholds) -> Self {
        self.confidence = thresholds;
        self
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.horizon_years.is_empty() {
            return Err(PredictionError::Config(
                "horizon_years must contain at least one horizon".into(),
            ));
        }
        if self.horizon_years[0] == 0 || self.horizon_years.windows(2).any(|w| w[0] >= w[1]) {
            return Err(PredictionError::Config(format!(
                "horizon_years must be positive and strictly ascending, got {:?}",
                self.horizon_years
            )));
        }
        if self.min_points == 0 || self.min_seasonal_cycles == 0 {
            return Err(PredictionError::Config(
                "min_points and min_seasonal_cycles must be at least 1".into(),
            ));
        }
        if self.seasonal_window_years == 0 {
            return Err(PredictionError::Config(
                "seasonal_window_years must be at least 1".into(),
            ));
        }
        if !(self.min_transition_years > 0.0 && self.min_transition_years <= self.max_transition_years)
        {
            return Err(PredictionError::Config(format!(
                "transition clamp must satisfy 0 < min <= max, got [{}, {}]",
                self.min_transition_years, self.max_transition_years
            )));
        }
        if !(self.stable_rate >= 0.0) || !(0.0..=1.0).contains(&self.safe_stable_fraction) {
            return Err(PredictionError::Config(
                "stable_rate must be non-negative and safe_stable_fraction within [0, 1]".into(),
            ));
        }
        let c = &self.confidence;
        if !(0.0..=1.0).contains(&c.high_r_squared) || !(0.0..=1.0).contains(&c.medium_r_squared) {
            return Err(PredictionError::Config(format!(
                "confidence R² thresholds must lie within [0, 1], got high={} medium={}",
                c.high_r_squared, c.medium_r_squared
            )));
        }
        Ok(())
    }
}
