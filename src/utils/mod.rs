//! Statistical primitives shared by the predictors.

pub mod metrics;
pub mod stats;

pub use metrics::{calculate_r_squared, calculate_standard_error};
pub use stats::{mean, round_to};
