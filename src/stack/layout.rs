use std::f64::consts::PI;

use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, ModelError, Result};
use crate::performance::round3;

/// Share `budget` between stages in proportion to their mass.
///
/// Lengths are layout units, not metres. Fails when no stage carries mass.
pub fn proportional_lengths(stage_masses: &[f64], budget: f64) -> Result<Vec<f64>> {
    if stage_masses.is_empty() {
        return Err(ModelError::NoStages);
    }
    let budget = ensure_positive("stack budget", budget)?;
    for &m in stage_masses {
        ensure_non_negative("stage mass", m)?;
    }

    let total = ensure_finite("stack mass", stage_masses.iter().sum())?;
    if total <= 0.0 {
        return Err(ModelError::DegenerateStack);
    }
    Ok(stage_masses.iter().map(|m| m / total * budget).collect())
}

/// Convert layout lengths to metres, given the physical height the budget represents.
pub fn scaled_lengths(lengths: &[f64], budget: f64, stack_height: f64) -> Result<Vec<f64>> {
    let budget = ensure_positive("stack budget", budget)?;
    let height = ensure_positive("stack height", stack_height)?;
    lengths
        .iter()
        .map(|&l| {
            let metres = ensure_non_negative("stage length", l)? * height / budget;
            ensure_finite("stage length", round3(metres))
        })
        .collect()
}

/// Physical stage lengths from propellant volume in a cylinder of `diameter`.
///
/// L = m / (pi * (d/2)^2 * rho). Independent of the proportional layout.
pub fn density_lengths(propellant_masses: &[f64], diameter: f64, density: f64) -> Result<Vec<f64>> {
    let d = ensure_positive("stage diameter", diameter)?;
    let rho = ensure_positive("propellant density", density)?;
    let area = PI * (d / 2.0).powi(2);
    propellant_masses
        .iter()
        .map(|&m| ensure_finite("stage length", ensure_non_negative("propellant mass", m)? / (area * rho)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lengths_fill_the_budget() {
        let lengths = proportional_lengths(&[120.0, 45.5, 27.8], 800.0).unwrap();
        assert_relative_eq!(lengths.iter().sum::<f64>(), 800.0, epsilon = 1e-9);
        assert!(lengths.iter().all(|&l| l >= 0.0));
    }

    #[test]
    fn lengths_proportional_to_mass() {
        let lengths = proportional_lengths(&[100.0, 300.0], 800.0).unwrap();
        assert_relative_eq!(lengths[0], 200.0);
        assert_relative_eq!(lengths[1], 600.0);
    }

    #[test]
    fn massless_stage_gets_zero_length() {
        let lengths = proportional_lengths(&[50.0, 0.0, 50.0], 800.0).unwrap();
        assert_eq!(lengths[1], 0.0);
        assert_relative_eq!(lengths[0], 400.0);
    }

    #[test]
    fn all_massless_is_degenerate() {
        assert_eq!(proportional_lengths(&[0.0, 0.0, 0.0], 800.0), Err(ModelError::DegenerateStack));
    }

    #[test]
    fn rejects_bad_budget_and_masses() {
        assert!(proportional_lengths(&[1.0], 0.0).is_err());
        assert!(proportional_lengths(&[1.0, -2.0], 800.0).is_err());
        assert_eq!(proportional_lengths(&[], 800.0), Err(ModelError::NoStages));
    }

    #[test]
    fn scale_budget_to_metres() {
        let m = scaled_lengths(&[400.0, 200.0, 200.0], 800.0, 10.0).unwrap();
        assert_eq!(m, vec![5.0, 2.5, 2.5]);
    }

    #[test]
    fn density_sizing_one_metre_tube() {
        // 1 m diameter, 1000 kg/m^3: 785.398 kg fills one metre.
        let l = density_lengths(&[PI / 4.0 * 1000.0, 0.0], 1.0, 1000.0).unwrap();
        assert_relative_eq!(l[0], 1.0, epsilon = 1e-12);
        assert_eq!(l[1], 0.0);
        assert!(density_lengths(&[1.0], 0.0, 1000.0).is_err());
    }

    #[test]
    fn vanishing_cross_section_overflows() {
        assert_eq!(
            density_lengths(&[100.0], 1e-200, 1800.0),
            Err(ModelError::Overflow { quantity: "stage length" })
        );
        assert_eq!(
            proportional_lengths(&[f64::MAX, f64::MAX], 800.0),
            Err(ModelError::Overflow { quantity: "stack mass" })
        );
    }
}
