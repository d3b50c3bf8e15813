use thiserror::Error;

/// Errors raised by the performance and stack models.
///
/// Every variant except [`ModelError::UndefinedRatio`] is a domain error:
/// an input that was rejected before any arithmetic ran.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("mass ratio {value}{} is outside (0, 1]", stage_suffix(.stage))]
    InvalidMassRatio { stage: Option<usize>, value: f64 },

    #[error("{quantity} must be positive and finite, got {value}")]
    NonPositive { quantity: &'static str, value: f64 },

    #[error("{quantity} must be non-negative and finite, got {value}")]
    Negative { quantity: &'static str, value: f64 },

    #[error("at least one stage is required")]
    NoStages,

    #[error("specific impulse given for {isp_stages} stages but configuration has {stages}")]
    StageCountMismatch { isp_stages: usize, stages: usize },

    #[error("stack carries no stage mass, proportional lengths are undefined")]
    DegenerateStack,

    #[error("efficiency is undefined against a zero reference value")]
    UndefinedRatio,

    #[error("{quantity} falls outside the representable floating-point range")]
    Overflow { quantity: &'static str },
}

impl ModelError {
    /// Attach a 1-based stage number to a mass-ratio error.
    pub fn at_stage(self, stage: usize) -> Self {
        match self {
            ModelError::InvalidMassRatio { value, .. } => {
                ModelError::InvalidMassRatio { stage: Some(stage), value }
            }
            other => other,
        }
    }

    /// True for input-validation failures, false for an undefined comparison.
    pub fn is_domain_error(&self) -> bool {
        !matches!(self, ModelError::UndefinedRatio)
    }
}

fn stage_suffix(stage: &Option<usize>) -> String {
    stage.map(|s| format!(" for stage {s}")).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, ModelError>;

// ---------------------------------------------------------------------------
// Shared input guards
// ---------------------------------------------------------------------------

pub(crate) fn ensure_positive(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ModelError::NonPositive { quantity, value })
    }
}

pub(crate) fn ensure_non_negative(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ModelError::Negative { quantity, value })
    }
}

/// Reject a computed result that overflowed to infinity or became NaN.
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::Overflow { quantity })
    }
}

pub(crate) fn ensure_mass_ratio(value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(ModelError::InvalidMassRatio { stage: None, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_guard_accepts_unit_and_rejects_zero() {
        assert_eq!(ensure_mass_ratio(1.0), Ok(1.0));
        assert!(ensure_mass_ratio(0.0).is_err());
        assert!(ensure_mass_ratio(-0.5).is_err());
        assert!(ensure_mass_ratio(1.01).is_err());
        assert!(ensure_mass_ratio(f64::NAN).is_err());
    }

    #[test]
    fn positive_guard_rejects_infinity() {
        assert!(ensure_positive("payload mass", f64::INFINITY).is_err());
        assert!(ensure_positive("payload mass", 0.0).is_err());
        assert_eq!(ensure_positive("payload mass", 250.0), Ok(250.0));
    }

    #[test]
    fn undefined_ratio_is_not_a_domain_error() {
        assert!(!ModelError::UndefinedRatio.is_domain_error());
        assert!(ModelError::NoStages.is_domain_error());
    }

    #[test]
    fn finite_guard_flags_overflow() {
        assert_eq!(ensure_finite("range", 1.0), Ok(1.0));
        assert_eq!(ensure_finite("range", f64::INFINITY), Err(ModelError::Overflow { quantity: "range" }));
        assert!(ensure_finite("range", f64::NAN).unwrap_err().is_domain_error());
    }

    #[test]
    fn messages_name_the_offending_stage() {
        let err = ensure_mass_ratio(0.0).unwrap_err();
        assert_eq!(err.to_string(), "mass ratio 0 is outside (0, 1]");
        let msg = err.at_stage(2).to_string();
        assert!(msg.contains("for stage 2"), "unexpected message: {}", msg);
    }
}
