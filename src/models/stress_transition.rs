//! Time-to-next-category estimates for groundwater stress.
//!
//! The estimator is a small state machine over [`StressCategory`], keyed by
//! the sign and magnitude of the annual decline rate:
//!
//! 1. Over-exploited is terminal.
//! 2. Negative rates are improving and never transition.
//! 3. Rates below the stable threshold (and, for Safe, below half its own
//!    threshold) are stable.
//! 4. Rates at or above the next threshold transition immediately.
//! 5. Otherwise the time is scaled from the current depth and shortened the
//!    closer the rate sits to the threshold.

use crate::core::{EngineConfig, StressCategory};
use crate::error::{PredictionError, Result};
use crate::utils::round_to;
use crate::validation::check_finite;
use chrono::{Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Direction of the water-table trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Declining,
    Stable,
    Improving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningPriority {
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionWarning {
    pub priority: WarningPriority,
    pub message: String,
}

/// Threshold reference row for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryThreshold {
    pub category: StressCategory,
    pub next_category: Option<StressCategory>,
    /// Decline rate (m/year) at which `next_category` is reached.
    pub decline_rate_threshold: Option<f64>,
}

/// Result of [`StressTransitionEstimator::estimate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionEstimate {
    pub current_category: StressCategory,
    pub next_category: Option<StressCategory>,
    pub years_until_transition: Option<f64>,
    pub estimated_transition_date: Option<NaiveDate>,
    /// Input rate rounded to three decimals.
    pub current_decline_rate: f64,
    pub trend: Trend,
    pub message: String,
    pub warning: Option<TransitionWarning>,
    pub thresholds: Vec<CategoryThreshold>,
}

/// Threshold table for every category, in severity order.
pub fn threshold_table() -> Vec<CategoryThreshold> {
    StressCategory::ALL
        .iter()
        .map(|&category| CategoryThreshold {
            category,
            next_category: category.next(),
            decline_rate_threshold: category.decline_threshold(),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct StressTransitionEstimator {
    stable_rate: f64,
    safe_stable_fraction: f64,
    min_years: f64,
    max_years: f64,
    warning_horizon_years: f64,
    rate_decimals: u32,
    years_decimals: u32,
}

impl Default for StressTransitionEstimator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl StressTransitionEstimator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            stable_rate: config.stable_rate,
            safe_stable_fraction: config.safe_stable_fraction,
            min_years: config.min_transition_years,
            max_years: config.max_transition_years,
            warning_horizon_years: config.warning_horizon_years,
            rate_decimals: config.rate_decimals,
            years_decimals: config.years_decimals,
        }
    }

    /// Estimate when `current_category` gives way to the next one.
    ///
    /// `as_of` anchors every estimated date, keeping the result a pure
    /// function of its arguments.
    pub fn estimate(
        &self,
        current_category: &str,
        annual_decline_rate: f64,
        current_water_level: f64,
        as_of: NaiveDate,
    ) -> Result<TransitionEstimate> {
        let category: StressCategory = current_category.parse()?;
        let rate = check_finite("annualDeclineRate", annual_decline_rate)?;
        let level = check_finite("currentWaterLevel", current_water_level)?;

        let mut estimate = TransitionEstimate {
            current_category: category,
            next_category: None,
            years_until_transition: None,
            estimated_transition_date: None,
            current_decline_rate: round_to(rate, self.rate_decimals),
            trend: self.trend(rate),
            message: String::new(),
            warning: None,
            thresholds: threshold_table(),
        };

        let (Some(next), Some(threshold), Some(depth_fraction)) = (
            category.next(),
            category.decline_threshold(),
            category.depth_fraction(),
        ) else {
            estimate.message =
                "Maximum stress level reached: the area is already Over-exploited.".to_string();
            return Ok(estimate);
        };

        if rate < 0.0 {
            estimate.message = format!(
                "Water levels are improving ({:.3} m/year); no transition from {category} is expected.",
                rate
            );
            return Ok(estimate);
        }
        if rate.abs() < self.stable_rate {
            estimate.message = format!(
                "Water levels are stable; no transition from {category} is expected."
            );
            return Ok(estimate);
        }
        if category == StressCategory::Safe && rate < threshold * self.safe_stable_fraction {
            estimate.trend = Trend::Stable;
            estimate.message = format!(
                "Water levels are stable: a decline of {rate:.3} m/year is well below the \
                 {threshold} m/year threshold for {next}."
            );
            return Ok(estimate);
        }

        estimate.next_category = Some(next);

        if rate >= threshold {
            estimate.years_until_transition = Some(0.0);
            estimate.estimated_transition_date = Some(as_of);
            estimate.message = format!(
                "Current decline rate of {rate:.3} m/year already exceeds the {threshold} m/year \
                 threshold for {next}; transition is immediate."
            );
            estimate.warning = Some(TransitionWarning {
                priority: WarningPriority::High,
                message: format!(
                    "Decline rate has already crossed the {next} threshold. \
                     Immediate groundwater management action is recommended."
                ),
            });
            return Ok(estimate);
        }

        let years = self.years_until(rate, threshold, depth_fraction, level);
        let date = add_fractional_years(as_of, years)?;

        tracing::debug!(
            category = %category,
            next = %next,
            rate,
            years,
            "Estimated stress-category transition"
        );

        estimate.years_until_transition = Some(years);
        estimate.estimated_transition_date = Some(date);
        estimate.message = format!(
            "At the current decline rate of {rate:.3} m/year, transition to {next} is \
             estimated in about {years} year(s)."
        );
        if years <= self.warning_horizon_years {
            estimate.warning = Some(TransitionWarning {
                priority: WarningPriority::High,
                message: format!(
                    "Transition to {next} expected within {years} year(s). \
                     Consider recharge measures and extraction limits."
                ),
            });
        }

        Ok(estimate)
    }

    fn trend(&self, rate: f64) -> Trend {
        if rate < 0.0 {
            Trend::Improving
        } else if rate.abs() < self.stable_rate {
            Trend::Stable
        } else {
            Trend::Declining
        }
    }

    /// Depth-scaled estimate, discounted by proximity to the threshold.
    fn years_until(&self, rate: f64, threshold: f64, depth_fraction: f64, level: f64) -> f64 {
        let rate_gap = threshold - rate;
        let mut years = depth_fraction * level / rate;
        years *= 1.0 - 0.5 * (1.0 - rate_gap / threshold);
        round_to(years.clamp(self.min_years, self.max_years), self.years_decimals)
    }
}

/// Advance by whole years plus the remaining fraction rounded to months.
fn add_fractional_years(from: NaiveDate, years: f64) -> Result<NaiveDate> {
    let whole = years.trunc();
    let months = ((years - whole) * 12.0).round();
    let total = (whole * 12.0 + months) as u32;
    from.checked_add_months(Months::new(total))
        .ok_or_else(|| PredictionError::ComputationError(format!(
            "{from} plus {years} year(s) is not a representable date"
        )))
}

/// Estimate as of the current UTC date with default settings.
pub fn predict_stress_category_transition(
    current_category: &str,
    annual_decline_rate: f64,
    current_water_level: f64,
) -> Result<TransitionEstimate> {
    StressTransitionEstimator::default().estimate(
        current_category,
        annual_decline_rate,
        current_water_level,
        Utc::now().date_naive(),
    )
}
