use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{ensure_finite, ensure_positive, ModelError, Result};

// ---------------------------------------------------------------------------
// Physical and layout constants
// ---------------------------------------------------------------------------

pub const G0: f64 = 9.81; // gravitational acceleration, m/s^2
pub const DEFAULT_ISP: f64 = 250.0; // s
pub const PAYLOAD_MASS: f64 = 250.0; // kg
pub const STACK_BUDGET: f64 = 800.0; // layout units shared between stages
pub const STACK_HEIGHT: f64 = 10.0; // m, physical height the budget stands for
pub const STAGE_DIAMETER: f64 = 1.0; // m
pub const PROPELLANT_DENSITY: f64 = 1_800.0; // kg/m^3, composite solid

/// Interactive inputs are documented to stay within this mass-ratio range.
pub const DOCUMENTED_RATIO_RANGE: (f64, f64) = (0.8, 1.0);

// ---------------------------------------------------------------------------
// Specific impulse: one value for every stage, or one per stage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecificImpulse {
    Uniform(f64),
    PerStage(Vec<f64>),
}

impl SpecificImpulse {
    /// Isp of the stage at zero-based `idx`.
    pub fn for_stage(&self, idx: usize) -> Result<f64> {
        match self {
            SpecificImpulse::Uniform(isp) => ensure_positive("specific impulse", *isp),
            SpecificImpulse::PerStage(values) => match values.get(idx) {
                Some(isp) => ensure_positive("specific impulse", *isp),
                None => Err(ModelError::StageCountMismatch {
                    isp_stages: values.len(),
                    stages: idx + 1,
                }),
            },
        }
    }
}

impl Default for SpecificImpulse {
    fn default() -> Self {
        SpecificImpulse::Uniform(DEFAULT_ISP)
    }
}

// ---------------------------------------------------------------------------
// Engine constants
// ---------------------------------------------------------------------------

/// Immutable constants shared by every computation in a trade study.
///
/// Fields missing from a JSON config file fall back to the defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConstants {
    pub gravity: f64,            // m/s^2
    pub isp: SpecificImpulse,    // s
    pub payload_mass: f64,       // kg
    pub stack_budget: f64,       // layout units
    pub stack_height: f64,       // m
    pub stage_diameter: f64,     // m
    pub propellant_density: f64, // kg/m^3
}

impl Default for EngineConstants {
    fn default() -> Self {
        Self {
            gravity: G0,
            isp: SpecificImpulse::default(),
            payload_mass: PAYLOAD_MASS,
            stack_budget: STACK_BUDGET,
            stack_height: STACK_HEIGHT,
            stage_diameter: STAGE_DIAMETER,
            propellant_density: PROPELLANT_DENSITY,
        }
    }
}

impl EngineConstants {
    /// Effective exhaust velocity Ve = Isp * g for the stage at `idx`.
    pub fn exhaust_velocity(&self, idx: usize) -> Result<f64> {
        let g = ensure_positive("gravitational acceleration", self.gravity)?;
        ensure_finite("exhaust velocity", self.isp.for_stage(idx)? * g)
    }

    /// Reject per-stage Isp tables that do not match the stage count.
    pub fn check_stage_count(&self, stages: usize) -> Result<()> {
        if stages == 0 {
            return Err(ModelError::NoStages);
        }
        match &self.isp {
            SpecificImpulse::PerStage(values) if values.len() != stages => {
                Err(ModelError::StageCountMismatch { isp_stages: values.len(), stages })
            }
            _ => Ok(()),
        }
    }

    /// Check every scalar constant for positivity and finiteness.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("gravitational acceleration", self.gravity)?;
        ensure_positive("payload mass", self.payload_mass)?;
        ensure_positive("stack budget", self.stack_budget)?;
        ensure_positive("stack height", self.stack_height)?;
        ensure_positive("stage diameter", self.stage_diameter)?;
        ensure_positive("propellant density", self.propellant_density)?;
        match &self.isp {
            SpecificImpulse::Uniform(isp) => {
                ensure_positive("specific impulse", *isp)?;
            }
            SpecificImpulse::PerStage(values) => {
                if values.is_empty() {
                    return Err(ModelError::NoStages);
                }
                for isp in values {
                    ensure_positive("specific impulse", *isp)?;
                }
            }
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> std::result::Result<Self, ConfigError> {
        let constants: EngineConstants = serde_json::from_str(json)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let constants = Self::from_json_str(&text)?;
        log::debug!("loaded engine constants from {}", path.as_ref().display());
        Ok(constants)
    }
}

/// Failures while loading an engine-constants file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_exhaust_velocity() {
        let c = EngineConstants::default();
        assert_relative_eq!(c.exhaust_velocity(0).unwrap(), 2452.5);
        assert_relative_eq!(c.exhaust_velocity(7).unwrap(), 2452.5);
    }

    #[test]
    fn per_stage_isp_lookup() {
        let c = EngineConstants {
            isp: SpecificImpulse::PerStage(vec![250.0, 300.0, 350.0]),
            ..Default::default()
        };
        assert_relative_eq!(c.exhaust_velocity(2).unwrap(), 350.0 * G0);
        assert_eq!(
            c.exhaust_velocity(3),
            Err(ModelError::StageCountMismatch { isp_stages: 3, stages: 4 })
        );
        assert!(c.check_stage_count(3).is_ok());
        assert!(c.check_stage_count(2).is_err());
        assert_eq!(c.check_stage_count(0), Err(ModelError::NoStages));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let c = EngineConstants::from_json_str(r#"{ "isp": [250, 300, 350], "payload_mass": 500 }"#)
            .unwrap();
        assert_eq!(c.isp, SpecificImpulse::PerStage(vec![250.0, 300.0, 350.0]));
        assert_relative_eq!(c.payload_mass, 500.0);
        assert_relative_eq!(c.gravity, G0);
        assert_relative_eq!(c.stack_budget, STACK_BUDGET);
    }

    #[test]
    fn uniform_isp_parses_from_number() {
        let c = EngineConstants::from_json_str(r#"{ "isp": 300 }"#).unwrap();
        assert_eq!(c.isp, SpecificImpulse::Uniform(300.0));
    }

    #[test]
    fn invalid_json_values_are_rejected() {
        let err = EngineConstants::from_json_str(r#"{ "gravity": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ModelError::NonPositive { .. })));

        let err = EngineConstants::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EngineConstants::from_json_file("/nonexistent/constants.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
