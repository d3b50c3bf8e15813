use crate::config::EngineConstants;
use crate::error::{ensure_finite, ensure_mass_ratio, ensure_positive, ModelError, Result};

use super::round3;

// ---------------------------------------------------------------------------
// Tsiolkovsky rocket equation
// ---------------------------------------------------------------------------

/// Velocity gained by burning a stage down to `mass_ratio` (final / initial mass).
///
/// dv = Ve * ln(1 / r), rounded to 3 decimals. A ratio of exactly 1 yields 0.
pub fn stage_delta_v(mass_ratio: f64, exhaust_velocity: f64) -> Result<f64> {
    let r = ensure_mass_ratio(mass_ratio)?;
    let ve = ensure_positive("exhaust velocity", exhaust_velocity)?;
    // ln(r) <= 0 on (0, 1]; taking |ln r| avoids the overflow of 1 / r.
    ensure_finite("stage delta-v", round3(ve * r.ln().abs()))
}

/// Per-stage delta-v increments, stage 1 first, each with its own Isp.
pub fn delta_v_increments(ratios: &[f64], constants: &EngineConstants) -> Result<Vec<f64>> {
    constants.check_stage_count(ratios.len())?;
    ratios
        .iter()
        .enumerate()
        .map(|(i, &r)| {
            let ve = constants.exhaust_velocity(i)?;
            stage_delta_v(r, ve).map_err(|e| e.at_stage(i + 1))
        })
        .collect()
}

/// Running totals: element i is the sum of increments 0..=i.
pub fn cumulative_sums(increments: &[f64]) -> Vec<f64> {
    increments
        .iter()
        .scan(0.0, |acc, dv| {
            *acc += dv;
            Some(*acc)
        })
        .collect()
}

/// Cumulative delta-v at each stage boundary (stage 1, 1+2, 1+2+3, ...).
pub fn cumulative_delta_v(ratios: &[f64], constants: &EngineConstants) -> Result<Vec<f64>> {
    let sums = cumulative_sums(&delta_v_increments(ratios, constants)?);
    for &v in &sums {
        ensure_finite("cumulative delta-v", v)?;
    }
    Ok(sums)
}

/// Effective first-stage mass ratio of a pop-out booster that burns for `burn_time`.
///
/// r = exp(-t / (2 * Isp)). Substituting into the rocket equation gives a
/// delta-v of g * t / 2 regardless of Isp.
pub fn burn_time_ratio(burn_time: f64, isp: f64) -> Result<f64> {
    let t = ensure_positive("burn time", burn_time)?;
    let isp = ensure_positive("specific impulse", isp)?;
    let ratio = (-t / (2.0 * isp)).exp();
    if ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(ModelError::Overflow { quantity: "burn-time mass ratio" })
    }
}
