use serde::Serialize;

use crate::error::{ensure_finite, ensure_mass_ratio, ensure_positive, ModelError, Result};

/// Per-stage mass breakdown, stage 1 (outermost) first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackMasses {
    pub payload_mass: f64,           // kg
    pub propellant_masses: Vec<f64>, // kg, mass each stage adds to the stack
    pub gross_masses: Vec<f64>,      // kg, payload + stages k..N at stage-k ignition
    pub total_mass: f64,             // kg, payload + all stages
}

/// Size each stage so that burning it down to its mass ratio leaves
/// everything inside it.
///
/// Works outward from the payload: stage N first, stage 1 last. With `R` the
/// mass already stacked, stage k adds `R / r_k - R`. A unit ratio adds nothing.
pub fn decompose_stack(ratios: &[f64], payload_mass: f64) -> Result<StackMasses> {
    if ratios.is_empty() {
        return Err(ModelError::NoStages);
    }
    let payload = ensure_positive("payload mass", payload_mass)?;

    let n = ratios.len();
    let mut propellant_masses = vec![0.0; n];
    let mut gross_masses = vec![0.0; n];
    let mut running = payload;

    for k in (0..n).rev() {
        let r = ensure_mass_ratio(ratios[k]).map_err(|e| e.at_stage(k + 1))?;
        let m = ensure_finite("stage mass", running / r - running)?;
        running = ensure_finite("stack mass", running + m)?;
        propellant_masses[k] = m;
        gross_masses[k] = running;
    }

    Ok(StackMasses {
        payload_mass: payload,
        propellant_masses,
        gross_masses,
        total_mass: running,
    })
}
