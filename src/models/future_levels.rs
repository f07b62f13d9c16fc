//! Linear extrapolation of water depth to fixed horizons.

use crate::core::{EngineConfig, RawRecord, LEVEL_UNIT};
use crate::error::{PredictionError, Result};
use crate::utils::round_to;
use crate::validation::{
    check_data_quality, check_finite, filter_invalid_historical_data, QualityRequirements,
};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Extent of the validated history used for a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Predicted depth at one horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelPrediction {
    /// Horizon in years from the base date.
    pub year: u32,
    pub date: NaiveDate,
    pub predicted_level: f64,
    pub unit: String,
}

/// Result of [`FutureLevelForecaster::forecast`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FutureLevelForecast {
    pub methodology: String,
    pub data_range: DataRange,
    pub predictions: Vec<LevelPrediction>,
}

/// Extrapolates a fitted regression line to the configured horizons.
///
/// # Example
/// ```
/// use groundwater_forecast::core::RawRecord;
/// use groundwater_forecast::models::FutureLevelForecaster;
/// use chrono::NaiveDate;
///
/// let history: Vec<RawRecord> = (0..3)
///     .map(|i| RawRecord::new(NaiveDate::from_ymd_opt(2021 + i, 1, 1).unwrap(), 10.0 + i as f64))
///     .collect();
/// let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
///
/// let forecast = FutureLevelForecaster::default()
///     .forecast(&history, 0.5, 10.0, base)
///     .unwrap();
/// assert_eq!(forecast.predictions.len(), 4);
/// assert_eq!(forecast.predictions[3].predicted_level, 12.5);
/// ```
#[derive(Debug, Clone)]
pub struct FutureLevelForecaster {
    horizon_years: Vec<u32>,
    min_points: usize,
    level_decimals: u32,
}

impl Default for FutureLevelForecaster {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl FutureLevelForecaster {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            horizon_years: config.horizon_years.clone(),
            min_points: config.min_points,
            level_decimals: config.level_decimals,
        }
    }

    pub fn horizon_years(&self) -> &[u32] {
        &self.horizon_years
    }

    /// Predict `intercept + slope * h` for every horizon `h`, dated `h` years after `base_date`.
    pub fn forecast(
        &self,
        history: &[RawRecord],
        slope: f64,
        intercept: f64,
        base_date: NaiveDate,
    ) -> Result<FutureLevelForecast> {
        let filtered = filter_invalid_historical_data(history);
        let quality = check_data_quality(
            &filtered.valid_data,
            &QualityRequirements::new(self.min_points, 0.0),
        );
        if !quality.is_valid {
            return Err(PredictionError::insufficient_points(
                "future water levels",
                quality.metrics.data_points,
                self.min_points,
            ));
        }
        check_finite("slope", slope)?;
        check_finite("intercept", intercept)?;

        let (Some(start), Some(end)) = (quality.metrics.start_date, quality.metrics.end_date)
        else {
            return Err(PredictionError::ComputationError(
                "validated history has no date range".to_string(),
            ));
        };

        let predictions = self
            .horizon_years
            .iter()
            .map(|&year| -> Result<LevelPrediction> {
                let date = base_date
                    .checked_add_months(Months::new(year * 12))
                    .ok_or_else(|| PredictionError::InvalidDate {
                        parameter: "baseDate".to_string(),
                        reason: format!("{base_date} plus {year} year(s) is not representable"),
                    })?;
                Ok(LevelPrediction {
                    year,
                    date,
                    predicted_level: round_to(
                        intercept + slope * f64::from(year),
                        self.level_decimals,
                    ),
                    unit: LEVEL_UNIT.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            points = quality.metrics.data_points,
            horizons = predictions.len(),
            slope,
            "Computed future water levels"
        );

        Ok(FutureLevelForecast {
            methodology: format!("{}-point linear regression", quality.metrics.data_points),
            data_range: DataRange { start, end },
            predictions,
        })
    }
}

/// Forecast with the default horizons `[1, 2, 3, 5]`.
pub fn compute_future_water_levels(
    history: &[RawRecord],
    slope: f64,
    intercept: f64,
    base_date: NaiveDate,
) -> Result<FutureLevelForecast> {
    FutureLevelForecaster::default().forecast(history, slope, intercept, base_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NonFinite;
    use approx::assert_relative_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn history(n: i32) -> Vec<RawRecord> {
        (0..n)
            .map(|i| RawRecord::new(ymd(2015 + i, 4, 10), 8.0 + 0.3 * i as f64))
            .collect()
    }

    #[test]
    fn predicts_fixed_horizons() {
        let forecast = compute_future_water_levels(&history(6), 0.3, 9.8, ymd(2024, 6, 15)).unwrap();

        let years: Vec<u32> = forecast.predictions.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![1, 2, 3, 5]);

        let dates: Vec<NaiveDate> = forecast.predictions.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![ymd(2025, 6, 15), ymd(2026, 6, 15), ymd(2027, 6, 15), ymd(2029, 6, 15)]
        );

        assert_relative_eq!(forecast.predictions[0].predicted_level, 10.1, epsilon = 1e-9);
        assert_relative_eq!(forecast.predictions[3].predicted_level, 11.3, epsilon = 1e-9);
        assert!(forecast.predictions.iter().all(|p| p.unit == LEVEL_UNIT));
        assert_eq!(forecast.methodology, "6-point linear regression");
        assert_eq!(forecast.data_range.start, ymd(2015, 4, 10));
        assert_eq!(forecast.data_range.end, ymd(2020, 4, 10));
    }

    #[test]
    fn rounds_to_two_decimals() {
        let forecast =
            compute_future_water_levels(&history(3), 0.123_456, 4.0, ymd(2024, 1, 1)).unwrap();
        assert_eq!(forecast.predictions[0].predicted_level, 4.12);
        assert_eq!(forecast.predictions[2].predicted_level, 4.37);
    }

    #[test]
    fn leap_day_base_clamps_to_month_end() {
        let forecast = compute_future_water_levels(&history(3), 0.1, 5.0, ymd(2024, 2, 29)).unwrap();
        assert_eq!(forecast.predictions[0].date, ymd(2025, 2, 28));
        assert_eq!(forecast.predictions[3].date, ymd(2029, 2, 28));
    }

    #[test]
    fn two_points_are_insufficient() {
        let err = compute_future_water_levels(&history(2), 0.1, 5.0, ymd(2024, 1, 1)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("insufficient data"));
        assert!(msg.contains("Found 2"));
        assert!(msg.contains("3 are required"));
    }

    #[test]
    fn invalid_records_do_not_count_toward_minimum() {
        let mut h = history(2);
        h.push(RawRecord::new(ymd(2020, 1, 1), f64::NAN));
        assert!(matches!(
            compute_future_water_levels(&h, 0.1, 5.0, ymd(2024, 1, 1)),
            Err(PredictionError::InsufficientData { found: 2, required: 3, .. })
        ));
    }

    #[test]
    fn rejects_non_finite_parameters() {
        let err =
            compute_future_water_levels(&history(3), f64::INFINITY, 5.0, ymd(2024, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            PredictionError::NotFinite {
                parameter: "slope".to_string(),
                reason: NonFinite::PositiveInfinity
            }
        );
        let err =
            compute_future_water_levels(&history(3), 0.1, f64::NAN, ymd(2024, 1, 1)).unwrap_err();
        assert!(err.to_string().contains("intercept"));
    }

    #[test]
    fn custom_horizons_from_config() {
        let config = EngineConfig::default().with_horizon_years(vec![10]);
        let forecast = FutureLevelForecaster::new(&config)
            .forecast(&history(3), -0.2, 6.0, ymd(2024, 1, 1))
            .unwrap();
        assert_eq!(forecast.predictions.len(), 1);
        assert_eq!(forecast.predictions[0].predicted_level, 4.0);
        assert_eq!(forecast.predictions[0].date, ymd(2034, 1, 1));
    }
}
