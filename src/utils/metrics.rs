//! Goodness-of-fit metrics over paired actual/predicted sequences.

use crate::error::{NonFinite, PredictionError, Result};
use crate::utils::stats::mean;

fn check_pairs(actual: &[f64], predicted: &[f64], operation: &str) -> Result<()> {
    if actual.len() != predicted.len() {
        return Err(PredictionError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(PredictionError::InsufficientData {
            operation: operation.to_string(),
            found: 0,
            required: 1,
            unit: "paired value(s)".to_string(),
            remediation: "Provide at least one actual/predicted pair.".to_string(),
        });
    }
    for (name, values) in [("actual", actual), ("predicted", predicted)] {
        if let Some((i, reason)) = values
            .iter()
            .enumerate()
            .find_map(|(i, v)| NonFinite::classify(*v).map(|r| (i, r)))
        {
            return Err(PredictionError::NotFinite {
                parameter: format!("{name}[{i}]"),
                reason,
            });
        }
    }
    Ok(())
}

fn sum_squared_residuals(actual: &[f64], predicted: &[f64]) -> f64 {
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum()
}

/// Coefficient of determination, clamped to `[0, 1]`.
///
/// Returns exactly 0 when `actual` has no variance to explain.
///
/// # Example
/// ```
/// use groundwater_forecast::utils::calculate_r_squared;
///
/// let r2 = calculate_r_squared(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(r2, 1.0);
/// ```
pub fn calculate_r_squared(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_pairs(actual, predicted, "R-squared")?;

    let mean_actual = mean(actual);
    let ss_tot: f64 = actual.iter().map(|a| (a - mean_actual).powi(2)).sum();
    if ss_tot == 0.0 {
        return Ok(0.0);
    }
    let ss_res = sum_squared_residuals(actual, predicted);

    Ok((1.0 - ss_res / ss_tot).clamp(0.0, 1.0))
}

/// Standard error of the estimate, `sqrt(SSres / (n - 2))`.
///
/// Needs at least three pairs so the degrees of freedom stay positive.
pub fn calculate_standard_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_pairs(actual, predicted, "standard error")?;

    let n = actual.len();
    if n < 3 {
        return Err(PredictionError::InsufficientData {
            operation: "standard error".to_string(),
            found: n,
            required: 3,
            unit: "paired value(s)".to_string(),
            remediation: "Two degrees of freedom are consumed by the regression line.".to_string(),
        });
    }

    Ok((sum_squared_residuals(actual, predicted) / (n - 2) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn r_squared_perfect_prediction() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(
            calculate_r_squared(&actual, &actual).unwrap(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn r_squared_known_value() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let predicted = vec![1.5, 2.5, 2.5, 4.5, 4.5];
        // SSres = 5 * 0.25 = 1.25, SStot = 10
        assert_relative_eq!(
            calculate_r_squared(&actual, &predicted).unwrap(),
            0.875,
            epsilon = 1e-12
        );
    }

    #[test]
    fn r_squared_clamps_poor_model_to_zero() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let predicted = vec![5.0, 4.0, 3.0, 2.0, 1.0];
        assert_eq!(calculate_r_squared(&actual, &predicted).unwrap(), 0.0);
    }

    #[test]
    fn r_squared_zero_variance_is_zero() {
        let actual = vec![4.0, 4.0, 4.0];
        let predicted = vec![4.0, 4.0, 4.0];
        assert_eq!(calculate_r_squared(&actual, &predicted).unwrap(), 0.0);
    }

    #[test]
    fn r_squared_rejects_bad_input() {
        assert!(matches!(
            calculate_r_squared(&[1.0, 2.0], &[1.0]),
            Err(PredictionError::DimensionMismatch { expected: 2, got: 1 })
        ));
        assert!(matches!(
            calculate_r_squared(&[], &[]),
            Err(PredictionError::InsufficientData { found: 0, .. })
        ));
        let err = calculate_r_squared(&[1.0, f64::NAN], &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            PredictionError::NotFinite {
                parameter: "actual[1]".to_string(),
                reason: NonFinite::NaN
            }
        );
    }

    #[test]
    fn standard_error_known_value() {
        let actual = vec![1.0, 2.0, 3.0, 4.0];
        let predicted = vec![1.5, 1.5, 3.5, 3.5];
        // SSres = 4 * 0.25 = 1, n - 2 = 2
        assert_relative_eq!(
            calculate_standard_error(&actual, &predicted).unwrap(),
            0.5_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn standard_error_needs_three_points() {
        let err = calculate_standard_error(&[1.0, 2.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::InsufficientData {
                found: 2,
                required: 3,
                ..
            }
        ));
        assert!(calculate_standard_error(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).is_ok());
    }
}
