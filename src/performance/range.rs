use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, Result};

use super::round3;

/// Ballistic range proxy: R = v^2 / g, rounded to 3 decimals.
///
/// Flat Earth, no drag, optimal launch angle folded into the constant.
/// This is not a trajectory solve.
pub fn range_from_velocity(delta_v: f64, gravity: f64) -> Result<f64> {
    let v = ensure_non_negative("delta-v", delta_v)?;
    let g = ensure_positive("gravitational acceleration", gravity)?;
    ensure_finite("range", round3(v * v / g))
}

/// Range reached at each stage boundary, from the cumulative delta-v series.
pub fn cumulative_ranges(cumulative_delta_v: &[f64], gravity: f64) -> Result<Vec<f64>> {
    cumulative_delta_v
        .iter()
        .map(|&v| range_from_velocity(v, gravity))
        .collect()
}
