use crate::error::{ensure_finite, ensure_non_negative, ModelError, Result};

/// Candidate as a percentage of reference: 100 * c / r.
///
/// The fraction is rounded to 1e-5 before scaling, so the percentage carries
/// three decimals. A zero reference yields [`ModelError::UndefinedRatio`],
/// which is distinct from a domain error on the inputs themselves.
pub fn compare_efficiency(candidate: f64, reference: f64) -> Result<f64> {
    let c = ensure_non_negative("candidate value", candidate)?;
    let r = ensure_non_negative("reference value", reference)?;
    if r == 0.0 {
        return Err(ModelError::UndefinedRatio);
    }
    ensure_finite("efficiency", ((c / r) * 100_000.0).round() / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn equal_values_are_one_hundred_percent() {
        for x in [0.001, 1.0, 775.191, 61_257.3] {
            assert_eq!(compare_efficiency(x, x).unwrap(), 100.0);
        }
    }

    #[test]
    fn zero_candidate_is_zero_percent() {
        assert_eq!(compare_efficiency(0.0, 500.0).unwrap(), 0.0);
    }

    #[test]
    fn zero_reference_is_undefined() {
        assert_eq!(compare_efficiency(10.0, 0.0), Err(ModelError::UndefinedRatio));
        assert_eq!(compare_efficiency(0.0, 0.0), Err(ModelError::UndefinedRatio));
    }

    #[test]
    fn negative_inputs_are_domain_errors() {
        let err = compare_efficiency(-1.0, 10.0).unwrap_err();
        assert!(err.is_domain_error());
        let err = compare_efficiency(1.0, -10.0).unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn tiny_reference_overflows() {
        assert_eq!(
            compare_efficiency(1.0, 1e-310),
            Err(ModelError::Overflow { quantity: "efficiency" })
        );
        assert!(compare_efficiency(1.0, 1e-300).unwrap().is_finite());
    }

    #[test]
    fn three_decimal_percentage() {
        assert_relative_eq!(compare_efficiency(1.0, 3.0).unwrap(), 33.333);
        assert_relative_eq!(compare_efficiency(2.0, 3.0).unwrap(), 66.667);
    }
}
