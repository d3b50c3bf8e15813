use serde::Serialize;

use crate::config::EngineConstants;
use crate::error::Result;
use crate::performance::{compare_efficiency, Performance};
use crate::stack::StackGeometry;
use crate::vehicle::Configuration;

// ---------------------------------------------------------------------------
// Single-configuration evaluation
// ---------------------------------------------------------------------------

/// Everything derived from one configuration. Stage-indexed series are stage 1 first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationReport {
    pub name: String,
    pub burn_time: Option<f64>, // s, pop-out first stage only
    pub mass_ratios: Vec<f64>,  // effective, after burn-time conversion
    #[serde(flatten)]
    pub performance: Performance,
    pub stack: StackGeometry,
}

impl ConfigurationReport {
    pub fn total_delta_v(&self) -> f64 {
        self.performance.total_delta_v
    }

    pub fn range(&self) -> f64 {
        self.performance.range
    }
}

/// Resolved ratios and performance for one design, stack not yet sized.
struct Evaluated<'a> {
    config: &'a Configuration,
    ratios: Vec<f64>,
    performance: Performance,
}

impl<'a> Evaluated<'a> {
    fn new(config: &'a Configuration, constants: &EngineConstants) -> Result<Self> {
        let ratios = config.mass_ratios(constants)?;
        let performance = Performance::from_ratios(&ratios, constants)?;
        Ok(Evaluated { config, ratios, performance })
    }

    fn with_stack(self, constants: &EngineConstants) -> Result<ConfigurationReport> {
        let stack = StackGeometry::from_ratios(&self.ratios, constants)?;
        log::debug!(
            "{}: dv={:.3} m/s range={:.3} m mass={:.3} kg",
            self.config.name,
            self.performance.total_delta_v,
            self.performance.range,
            stack.total_mass
        );
        Ok(ConfigurationReport {
            name: self.config.name.clone(),
            burn_time: self.config.first_stage.burn_time(),
            mass_ratios: self.ratios,
            performance: self.performance,
            stack,
        })
    }
}

/// Run both models on one configuration. Any invalid input aborts the whole evaluation.
pub fn evaluate(config: &Configuration, constants: &EngineConstants) -> Result<ConfigurationReport> {
    Evaluated::new(config, constants)?.with_stack(constants)
}

// ---------------------------------------------------------------------------
// Optimized vs pop-out comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeStudy {
    pub optimized: ConfigurationReport,
    pub pop_out: ConfigurationReport,
    pub delta_v_efficiency_pct: f64, // pop-out as % of optimized
    pub range_efficiency_pct: f64,
}

impl TradeStudy {
    /// Evaluate both designs against the same constants.
    ///
    /// Fails without a partial result if either design is invalid, the
    /// optimized design produces zero delta-v, or a stack cannot be sized.
    pub fn run(
        optimized: &Configuration,
        pop_out: &Configuration,
        constants: &EngineConstants,
    ) -> Result<Self> {
        constants.validate()?;
        let optimized = Evaluated::new(optimized, constants)?;
        let pop_out = Evaluated::new(pop_out, constants)?;

        let delta_v_efficiency_pct = compare_efficiency(
            pop_out.performance.total_delta_v,
            optimized.performance.total_delta_v,
        )?;
        let range_efficiency_pct =
            compare_efficiency(pop_out.performance.range, optimized.performance.range)?;

        let optimized = optimized.with_stack(constants)?;
        let pop_out = pop_out.with_stack(constants)?;

        log::info!(
            "{} is {}% efficient in velocity and {}% efficient in range",
            pop_out.name,
            delta_v_efficiency_pct,
            range_efficiency_pct
        );

        Ok(TradeStudy {
            optimized,
            pop_out,
            delta_v_efficiency_pct,
            range_efficiency_pct,
        })
    }
}
