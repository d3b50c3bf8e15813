pub mod decomposition;
pub mod layout;

use serde::Serialize;

use crate::config::EngineConstants;
use crate::error::Result;

pub use decomposition::{decompose_stack, StackMasses};
pub use layout::{density_lengths, proportional_lengths, scaled_lengths};

// ---------------------------------------------------------------------------
// Stack geometry: masses plus the lengths used to draw the stack
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackGeometry {
    pub payload_mass: f64,         // kg
    pub stage_masses: Vec<f64>,    // kg, stage 1 first
    pub gross_masses: Vec<f64>,    // kg
    pub total_mass: f64,           // kg
    pub stage_lengths: Vec<f64>,   // layout units
    pub stage_lengths_m: Vec<f64>, // m
    pub total_length: f64,         // layout units
}

impl StackGeometry {
    pub fn from_ratios(ratios: &[f64], constants: &EngineConstants) -> Result<Self> {
        let masses = decompose_stack(ratios, constants.payload_mass)?;
        let stage_lengths = proportional_lengths(&masses.propellant_masses, constants.stack_budget)?;
        let stage_lengths_m =
            scaled_lengths(&stage_lengths, constants.stack_budget, constants.stack_height)?;
        let total_length = stage_lengths.iter().sum();

        Ok(StackGeometry {
            payload_mass: masses.payload_mass,
            stage_masses: masses.propellant_masses,
            gross_masses: masses.gross_masses,
            total_mass: masses.total_mass,
            stage_lengths,
            stage_lengths_m,
            total_length,
        })
    }

    /// Physical stage lengths when sized by propellant density instead of proportion.
    pub fn density_lengths(&self, constants: &EngineConstants) -> Result<Vec<f64>> {
        density_lengths(
            &self.stage_masses,
            constants.stage_diameter,
            constants.propellant_density,
        )
    }
}
