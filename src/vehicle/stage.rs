use serde::{Deserialize, Serialize};

use crate::config::{EngineConstants, DOCUMENTED_RATIO_RANGE};
use crate::error::{ensure_mass_ratio, Result};
use crate::performance::burn_time_ratio;

// ---------------------------------------------------------------------------
// First stage: either sized by mass ratio or by burn time (pop-out booster)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstStage {
    MassRatio(f64),
    BurnTime(f64), // s
}

impl FirstStage {
    /// Mass ratio the first stage contributes to the rocket equation.
    ///
    /// A burn-time stage is converted with the first stage's Isp.
    pub fn mass_ratio(&self, constants: &EngineConstants) -> Result<f64> {
        match *self {
            FirstStage::MassRatio(r) => checked_ratio(1, r),
            FirstStage::BurnTime(t) => burn_time_ratio(t, constants.isp.for_stage(0)?),
        }
    }

    pub fn burn_time(&self) -> Option<f64> {
        match *self {
            FirstStage::BurnTime(t) => Some(t),
            FirstStage::MassRatio(_) => None,
        }
    }
}

/// Validate a user-supplied ratio for 1-based `stage`.
///
/// Ratios outside the documented input range are still computed, only logged.
pub(crate) fn checked_ratio(stage: usize, ratio: f64) -> Result<f64> {
    let r = ensure_mass_ratio(ratio).map_err(|e| e.at_stage(stage))?;
    let (lo, hi) = DOCUMENTED_RATIO_RANGE;
    if r < lo || r > hi {
        log::warn!("stage {} mass ratio {} is outside the documented range [{}, {}]", stage, r, lo, hi);
    }
    Ok(r)
}
