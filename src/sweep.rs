use nalgebra::DMatrix;
use serde::Serialize;

use crate::config::{EngineConstants, SpecificImpulse};
use crate::error::{ensure_positive, Result};
use crate::performance::stage_delta_v;

// ---------------------------------------------------------------------------
// Mass-ratio sweep: total delta-v over stage 1 x stage 2 ratios
// ---------------------------------------------------------------------------

pub const SWEEP_POINTS: usize = 21; // 0.80 ..= 1.00 in 0.01 steps
pub const STAGE3_RATIO: f64 = 0.9;
pub const BOOSTER_ISP: f64 = 200.0; // s
pub const BOOSTER_RATIO: f64 = 0.9;

/// Ratio axis shared by both sweep dimensions.
pub fn ratio_axis() -> Vec<f64> {
    (0..SWEEP_POINTS).map(|i| (80 + i) as f64 / 100.0).collect()
}

/// Constants with the 250 / 300 / 350 s stage Isp ladder the sweep is run with.
pub fn staged_isp_constants() -> EngineConstants {
    EngineConstants {
        isp: SpecificImpulse::PerStage(vec![250.0, 300.0, 350.0]),
        ..Default::default()
    }
}

/// Total delta-v on a grid. Row i is stage-1 ratio `ratios[i]`, column j is
/// stage-2 ratio `ratios[j]`; stage 3 is held fixed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaVSurface {
    pub ratios: Vec<f64>,
    pub stage3_ratio: f64,
    pub values: DMatrix<f64>, // m/s
}

impl DeltaVSurface {
    pub fn compute(constants: &EngineConstants, stage3_ratio: f64) -> Result<Self> {
        constants.check_stage_count(3)?;
        let ratios = ratio_axis();

        let dv1 = axis_delta_v(&ratios, constants.exhaust_velocity(0)?)?;
        let dv2 = axis_delta_v(&ratios, constants.exhaust_velocity(1)?)?;
        let dv3 = stage_delta_v(stage3_ratio, constants.exhaust_velocity(2)?)
            .map_err(|e| e.at_stage(3))?;

        let n = ratios.len();
        let values = DMatrix::from_fn(n, n, |i, j| dv1[i] + dv2[j] + dv3);
        log::debug!("swept {}x{} mass-ratio grid, stage 3 at {}", n, n, stage3_ratio);

        Ok(DeltaVSurface { ratios, stage3_ratio, values })
    }

    /// The same surface with a strap-on booster's delta-v added everywhere.
    pub fn with_booster(&self, booster_isp: f64, booster_ratio: f64, gravity: f64) -> Result<Self> {
        let ve = ensure_positive("booster specific impulse", booster_isp)?
            * ensure_positive("gravitational acceleration", gravity)?;
        let boost = stage_delta_v(booster_ratio, ve)?;
        Ok(DeltaVSurface {
            ratios: self.ratios.clone(),
            stage3_ratio: self.stage3_ratio,
            values: self.values.add_scalar(boost),
        })
    }

    /// Total delta-v at the given grid indices.
    pub fn at(&self, stage1_idx: usize, stage2_idx: usize) -> Option<f64> {
        self.values.get((stage1_idx, stage2_idx)).copied()
    }

    /// Best cell: (stage-1 ratio, stage-2 ratio, delta-v).
    pub fn peak(&self) -> (f64, f64, f64) {
        // Storage is column-major.
        let (idx, dv) = self
            .values
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (k, v)| if v > best.1 { (k, v) } else { best });
        let n = self.values.nrows();
        let (i, j) = (idx % n, idx / n);
        (self.ratios[i], self.ratios[j], dv)
    }
}

/// Plain and booster-assisted surfaces, both under [`staged_isp_constants`].
///
/// The Isp ladder and g are fixed so the two grids stay comparable
/// whatever constants the trade study itself runs with.
pub fn reference_surfaces() -> Result<(DeltaVSurface, DeltaVSurface)> {
    let constants = staged_isp_constants();
    let plain = DeltaVSurface::compute(&constants, STAGE3_RATIO)?;
    let boosted = plain.with_booster(BOOSTER_ISP, BOOSTER_RATIO, constants.gravity)?;
    Ok((plain, boosted))
}

fn axis_delta_v(ratios: &[f64], exhaust_velocity: f64) -> Result<Vec<f64>> {
    ratios.iter().map(|&r| stage_delta_v(r, exhaust_velocity)).collect()
}
