pub mod delta_v;
pub mod efficiency;
pub mod range;

pub use delta_v::{
    burn_time_ratio, cumulative_delta_v, cumulative_sums, delta_v_increments, stage_delta_v,
};
pub use efficiency::compare_efficiency;
pub use range::{cumulative_ranges, range_from_velocity};

use serde::Serialize;

use crate::config::EngineConstants;
use crate::error::Result;

/// Round to three decimal places, the precision every reported value uses.
///
/// Magnitudes too large to scale by 1000 already have no fractional digits.
pub fn round3(value: f64) -> f64 {
    let scaled = value * 1000.0;
    if scaled.is_finite() {
        scaled.round() / 1000.0
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Performance summary for one set of stage ratios
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Performance {
    pub stage_delta_v: Vec<f64>,      // m/s, per-stage increment
    pub cumulative_delta_v: Vec<f64>, // m/s, at each stage boundary
    pub total_delta_v: f64,           // m/s
    pub cumulative_range: Vec<f64>,   // m
    pub range: f64,                   // m
}

impl Performance {
    pub fn from_ratios(ratios: &[f64], constants: &EngineConstants) -> Result<Self> {
        let stage_delta_v = delta_v_increments(ratios, constants)?;
        let cumulative_delta_v = cumulative_sums(&stage_delta_v);
        let total_delta_v = cumulative_delta_v.last().copied().unwrap_or(0.0);
        let cumulative_range = cumulative_ranges(&cumulative_delta_v, constants.gravity)?;
        let range = range_from_velocity(total_delta_v, constants.gravity)?;

        Ok(Performance {
            stage_delta_v,
            cumulative_delta_v,
            total_delta_v,
            cumulative_range,
            range,
        })
    }
}
