//! Statistical utility functions.

/// Round to a fixed number of decimal places, half away from zero.
///
/// # Example
/// ```
/// use groundwater_forecast::utils::round_to;
///
/// assert_eq!(round_to(12.345_6, 2), 12.35);
/// assert_eq!(round_to(-0.125_1, 3), -0.125);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn round_to_known_values() {
        assert_eq!(round_to(1.005_1, 2), 1.01);
        assert_eq!(round_to(10.2, 1), 10.2);
        assert_eq!(round_to(0.098_765, 3), 0.099);
        assert_eq!(round_to(-3.456, 2), -3.46);
        assert_eq!(round_to(7.0, 0), 7.0);
    }

    #[test]
    fn mean_calculates_correctly() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0, epsilon = 1e-10);
        assert_relative_eq!(mean(&[10.0]), 10.0, epsilon = 1e-10);
        assert!(mean(&[]).is_nan());
    }
}
