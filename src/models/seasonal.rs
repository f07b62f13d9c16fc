//! Bi-annual (pre-/post-monsoon) depth forecasts.
//!
//! History is bucketed into the two measurement seasons, each bucket is
//! averaged over a trailing window anchored at its most recent record, and the
//! averages are shifted by the regression slope to the next two season
//! instances.

use crate::core::{EngineConfig, HistoricalRecord, RawRecord, RechargeEntry, Season, LEVEL_UNIT};
use crate::error::{PredictionError, Result};
use crate::utils::{mean, round_to};
use crate::validation::{
    check_data_quality, check_finite, filter_invalid_historical_data, validate_seasonal_data,
    QualityRequirements,
};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Offset from the start of a year to the middle of a season.
const SEASON_MIDPOINT_YEARS: f64 = 0.5;

/// Forecast for one upcoming season instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonProjection {
    pub season: Season,
    /// Month range and year, e.g. `"October-December 2024"`.
    pub period: String,
    pub predicted_level: f64,
    /// Windowed historical average for this season.
    pub historical_average: f64,
    /// Rise of the water table relative to the preceding reading; positive is recharge.
    pub expected_recharge: f64,
    pub unit: String,
}

/// Result of [`SeasonalForecaster::forecast`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalForecast {
    pub methodology: String,
    pub current_season: Season,
    pub next_season: SeasonProjection,
    pub following_season: SeasonProjection,
}

#[derive(Debug, Clone)]
pub struct SeasonalForecaster {
    min_points: usize,
    min_cycles: usize,
    window_years: u32,
    level_decimals: u32,
}

impl Default for SeasonalForecaster {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl SeasonalForecaster {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            min_points: config.min_points,
            min_cycles: config.min_seasonal_cycles,
            window_years: config.seasonal_window_years,
            level_decimals: config.level_decimals,
        }
    }

    pub fn forecast(
        &self,
        history: &[RawRecord],
        current_date: NaiveDate,
        slope: f64,
    ) -> Result<SeasonalForecast> {
        let filtered = filter_invalid_historical_data(history);
        let valid = filtered.valid_data;
        let quality = check_data_quality(&valid, &QualityRequirements::new(self.min_points, 0.0));
        if !quality.is_valid {
            return Err(PredictionError::insufficient_points(
                "seasonal forecast",
                quality.metrics.data_points,
                self.min_points,
            ));
        }
        if slope != 0.0 {
            check_finite("slope", slope)?;
        }

        let cycles = validate_seasonal_data(&recharge_pattern(&valid), self.min_cycles);
        if !cycles.is_valid {
            return Err(PredictionError::insufficient_cycles(
                cycles.complete_cycles,
                self.min_cycles,
            ));
        }

        let (pre, post): (Vec<HistoricalRecord>, Vec<HistoricalRecord>) = valid
            .iter()
            .copied()
            .filter(|r| Season::from_month(r.date.month()).is_some())
            .partition(|r| Season::from_month(r.date.month()) == Some(Season::PreMonsoon));

        let pre_average = self.windowed_average(&pre, Season::PreMonsoon)?;
        let post_average = self.windowed_average(&post, Season::PostMonsoon)?;
        let average_of = |season: Season| match season {
            Season::PreMonsoon => pre_average,
            Season::PostMonsoon => post_average,
        };

        let current_season = Season::for_forecast(current_date.month());
        let next_season = current_season.opposite();
        let following_season = next_season.opposite();

        let current_year = current_date.year();
        let next_year = advance_year(current_year, current_season, next_season);
        let following_year = advance_year(next_year, next_season, following_season);

        let predict = |season: Season, year: i32| {
            let years_from_base = f64::from(year - current_year) + SEASON_MIDPOINT_YEARS;
            round_to(average_of(season) + slope * years_from_base, self.level_decimals)
        };
        let next_predicted = predict(next_season, next_year);
        let following_predicted = predict(following_season, following_year);

        let previous_observed = valid
            .iter()
            .max_by_key(|r| r.date)
            .map(|r| r.water_level)
            .unwrap_or_else(|| average_of(current_season));

        tracing::debug!(
            pre_average,
            post_average,
            cycles = cycles.complete_cycles,
            "Computed seasonal forecast"
        );

        Ok(SeasonalForecast {
            methodology: format!(
                "{}-year seasonal average with trend adjustment",
                self.window_years
            ),
            current_season,
            next_season: SeasonProjection {
                season: next_season,
                period: format!("{} {next_year}", next_season.display_range()),
                predicted_level: next_predicted,
                historical_average: average_of(next_season),
                expected_recharge: round_to(previous_observed - next_predicted, self.level_decimals),
                unit: LEVEL_UNIT.to_string(),
            },
            following_season: SeasonProjection {
                season: following_season,
                period: format!("{} {following_year}", following_season.display_range()),
                predicted_level: following_predicted,
                historical_average: average_of(following_season),
                expected_recharge: round_to(
                    next_predicted - following_predicted,
                    self.level_decimals,
                ),
                unit: LEVEL_UNIT.to_string(),
            },
        })
    }

    /// Mean of the records within `window_years` of the bucket's latest record.
    fn windowed_average(&self, records: &[HistoricalRecord], season: Season) -> Result<f64> {
        let mut sorted = records.to_vec();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));

        let Some(latest) = sorted.first().map(|r| r.date) else {
            return Err(PredictionError::ComputationError(format!(
                "no {season} records available to average"
            )));
        };
        let cutoff = latest.checked_sub_months(Months::new(self.window_years * 12));

        let levels: Vec<f64> = sorted
            .iter()
            .take_while(|r| cutoff.map_or(true, |c| r.date >= c))
            .map(|r| r.water_level)
            .collect();

        let average = round_to(mean(&levels), self.level_decimals);
        if !average.is_finite() {
            return Err(PredictionError::ComputationError(format!(
                "{season} average could not be computed from {} record(s)",
                levels.len()
            )));
        }
        Ok(average)
    }
}

/// The year rolls over when the sequence moves from post- to pre-monsoon.
fn advance_year(year: i32, from: Season, to: Season) -> i32 {
    if from == Season::PostMonsoon && to == Season::PreMonsoon {
        year + 1
    } else {
        year
    }
}

/// Per-year seasonal means and recharge, in ascending year order.
///
/// Monsoon-month records are ignored. Years with no seasonal records are omitted.
pub fn recharge_pattern(records: &[HistoricalRecord]) -> Vec<RechargeEntry> {
    let mut by_year: BTreeMap<i32, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for record in records {
        match Season::from_month(record.date.month()) {
            Some(Season::PreMonsoon) => by_year
                .entry(record.date.year())
                .or_default()
                .0
                .push(record.water_level),
            Some(Season::PostMonsoon) => by_year
                .entry(record.date.year())
                .or_default()
                .1
                .push(record.water_level),
            None => {}
        }
    }

    by_year
        .into_iter()
        .map(|(year, (pre, post))| {
            let pre_monsoon = (!pre.is_empty()).then(|| round_to(mean(&pre), 2));
            let post_monsoon = (!post.is_empty()).then(|| round_to(mean(&post), 2));
            let recharge = match (pre_monsoon, post_monsoon) {
                (Some(pre), Some(post)) => Some(round_to(pre - post, 2)),
                _ => None,
            };
            RechargeEntry {
                year,
                pre_monsoon,
                post_monsoon,
                recharge,
            }
        })
        .collect()
}

/// Forecast the next two seasons with default settings.
pub fn predict_seasonal_levels(
    history: &[RawRecord],
    current_date: NaiveDate,
    slope: f64,
) -> Result<SeasonalForecast> {
    SeasonalForecaster::default().forecast(history, current_date, slope)
}
