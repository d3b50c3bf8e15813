use std::path::Path;

use serde::{Deserialize, Serialize};

use super::stage::{checked_ratio, FirstStage};
use crate::config::{ConfigError, EngineConstants};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Configuration: a named booster design, stage 1 first
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub name: String,
    pub first_stage: FirstStage,
    pub upper_ratios: Vec<f64>, // stages 2..N
}

impl Configuration {
    pub fn stage_count(&self) -> usize {
        1 + self.upper_ratios.len()
    }

    pub fn is_pop_out(&self) -> bool {
        self.first_stage.burn_time().is_some()
    }

    /// Effective mass ratio of every stage, validated, stage 1 first.
    pub fn mass_ratios(&self, constants: &EngineConstants) -> Result<Vec<f64>> {
        constants.check_stage_count(self.stage_count())?;
        let mut ratios = Vec::with_capacity(self.stage_count());
        ratios.push(self.first_stage.mass_ratio(constants)?);
        for (i, &r) in self.upper_ratios.iter().enumerate() {
            ratios.push(checked_ratio(i + 2, r)?);
        }
        Ok(ratios)
    }
}

// ---------------------------------------------------------------------------
// Configuration builder
// ---------------------------------------------------------------------------

pub struct ConfigurationBuilder {
    name: String,
    first_stage: FirstStage,
    upper_ratios: Vec<f64>,
}

impl ConfigurationBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            first_stage: FirstStage::MassRatio(0.9),
            upper_ratios: vec![],
        }
    }

    pub fn first_stage_ratio(mut self, r: f64) -> Self { self.first_stage = FirstStage::MassRatio(r); self }
    pub fn burn_time(mut self, t: f64) -> Self { self.first_stage = FirstStage::BurnTime(t); self }

    /// Append the next upper stage.
    pub fn stage(mut self, r: f64) -> Self {
        self.upper_ratios.push(r);
        self
    }

    pub fn build(self) -> Configuration {
        Configuration {
            name: self.name,
            first_stage: self.first_stage,
            upper_ratios: self.upper_ratios,
        }
    }
}

// ---------------------------------------------------------------------------
// Design pair loaded from JSON
// ---------------------------------------------------------------------------

/// The two designs a trade study compares.
///
/// ```json
/// { "optimized": { "name": "A", "first_stage": { "mass_ratio": 0.9 }, "upper_ratios": [0.9, 0.9] },
///   "pop_out":   { "name": "B", "first_stage": { "burn_time": 10.0 }, "upper_ratios": [0.9, 0.9] } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDesigns {
    pub optimized: Configuration,
    pub pop_out: Configuration,
}

impl Default for TradeDesigns {
    fn default() -> Self {
        Self {
            optimized: presets::optimized(),
            pop_out: presets::pop_out(),
        }
    }
}

impl TradeDesigns {
    pub fn from_json_str(json: &str) -> std::result::Result<Self, ConfigError> {
        let designs: TradeDesigns = serde_json::from_str(json)?;
        if !designs.pop_out.is_pop_out() {
            log::warn!(
                "pop-out design '{}' has no first-stage burn time, comparing two mass-ratio designs",
                designs.pop_out.name
            );
        }
        Ok(designs)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let designs = Self::from_json_str(&text)?;
        log::debug!("loaded designs from {}", path.as_ref().display());
        Ok(designs)
    }
}

// ---------------------------------------------------------------------------
// Preset configurations
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Conventional three-stage rocket, every stage at 0.9.
    pub fn optimized() -> Configuration {
        ConfigurationBuilder::new("Optimized Rocket")
            .first_stage_ratio(0.9)
            .stage(0.9)
            .stage(0.9)
            .build()
    }

    /// Pop-out booster: 10 s first-stage burn, upper stages at 0.9.
    pub fn pop_out() -> Configuration {
        ConfigurationBuilder::new("Pop-Out Booster")
            .burn_time(10.0)
            .stage(0.9)
            .stage(0.9)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpecificImpulse;
    use crate::error::ModelError;
    use approx::assert_relative_eq;

    #[test]
    fn presets_have_three_stages() {
        assert_eq!(presets::optimized().stage_count(), 3);
        assert_eq!(presets::pop_out().stage_count(), 3);
        assert!(presets::pop_out().is_pop_out());
        assert!(!presets::optimized().is_pop_out());
    }

    #[test]
    fn pop_out_ratios_resolve_burn_time() {
        let c = EngineConstants::default();
        let r = presets::pop_out().mass_ratios(&c).unwrap();
        assert_relative_eq!(r[0], 0.980199, epsilon = 1e-6);
        assert_eq!(&r[1..], &[0.9, 0.9]);
    }

    #[test]
    fn bad_upper_stage_reports_index() {
        let c = EngineConstants::default();
        let cfg = ConfigurationBuilder::new("bad").stage(0.9).stage(1.2).build();
        assert_eq!(
            cfg.mass_ratios(&c),
            Err(ModelError::InvalidMassRatio { stage: Some(3), value: 1.2 })
        );
    }

    #[test]
    fn isp_table_must_match_stage_count() {
        let c = EngineConstants {
            isp: SpecificImpulse::PerStage(vec![250.0, 300.0]),
            ..Default::default()
        };
        assert_eq!(
            presets::optimized().mass_ratios(&c),
            Err(ModelError::StageCountMismatch { isp_stages: 2, stages: 3 })
        );
    }

    #[test]
    fn designs_load_from_json() {
        let designs = TradeDesigns::from_json_str(
            r#"{
                "optimized": { "name": "Four", "first_stage": { "mass_ratio": 0.85 }, "upper_ratios": [0.9, 0.9, 0.95] },
                "pop_out":   { "name": "Strap", "first_stage": { "burn_time": 20.0 }, "upper_ratios": [0.9] }
            }"#,
        )
        .unwrap();
        assert_eq!(designs.optimized.stage_count(), 4);
        assert_eq!(designs.optimized.first_stage, FirstStage::MassRatio(0.85));
        assert!(designs.pop_out.is_pop_out());
        assert_eq!(designs.pop_out.upper_ratios, vec![0.9]);
    }

    #[test]
    fn default_designs_match_presets() {
        let json = serde_json::to_string(&TradeDesigns::default()).unwrap();
        assert_eq!(TradeDesigns::from_json_str(&json).unwrap(), TradeDesigns::default());
    }

    #[test]
    fn malformed_designs_are_parse_errors() {
        let err = TradeDesigns::from_json_str(r#"{ "optimized": {} }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn builds_n_stage_configurations() {
        let cfg = ConfigurationBuilder::new("five")
            .first_stage_ratio(0.8)
            .stage(0.85)
            .stage(0.9)
            .stage(0.95)
            .stage(1.0)
            .build();
        assert_eq!(cfg.stage_count(), 5);
        let c = EngineConstants::default();
        assert_eq!(cfg.mass_ratios(&c).unwrap(), vec![0.8, 0.85, 0.9, 0.95, 1.0]);
    }
}
