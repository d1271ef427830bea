// src/error.rs
use thiserror::Error;

/// Error types for the gbm-risk library
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid parameter values, detected before any simulation work
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Simulated values left the domain of finite positive prices
    #[error("Numeric degeneracy in {method}: {reason}")]
    NumericDegeneracy { method: String, reason: String },

    /// A chart sink could not produce an artifact
    #[error("Failed to render '{artifact}': {reason}")]
    Render { artifact: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for gbm-risk operations
pub type SimResult<T> = Result<T, SimError>;

/// Validation utilities
pub mod validation {
    use super::{SimError, SimResult};

    fn invalid(name: &str, value: f64, constraint: &str) -> SimError {
        SimError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: constraint.to_string(),
        }
    }

    /// Validate that a parameter is finite and positive
    pub fn validate_positive(name: &str, value: f64) -> SimResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(invalid(name, value, "must be positive (> 0)"))
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is finite and non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> SimResult<()> {
        validate_finite(name, value)?;
        if value < 0.0 {
            Err(invalid(name, value, "must be non-negative (≥ 0)"))
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> SimResult<()> {
        if !value.is_finite() {
            Err(invalid(name, value, "must be finite (not NaN or infinite)"))
        } else {
            Ok(())
        }
    }

    /// Validate a step or simulation count
    pub fn validate_count(name: &str, value: usize) -> SimResult<()> {
        if value == 0 {
            Err(invalid(name, 0.0, "must be greater than 0"))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("s0", 100.0).is_ok());
        assert!(validate_positive("s0", 0.0).is_err());
        assert!(validate_positive("s0", -1.0).is_err());
        assert!(validate_positive("s0", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("sigma", 0.0).is_ok());
        assert!(validate_non_negative("sigma", 0.2).is_ok());
        assert!(validate_non_negative("sigma", -0.1).is_err());
        assert!(validate_non_negative("sigma", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("mu", -0.3).is_ok());
        assert!(validate_finite("mu", f64::NAN).is_err());
        assert!(validate_finite("mu", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_count() {
        assert!(validate_count("steps", 1).is_ok());
        assert!(matches!(
            validate_count("n_sims", 0),
            Err(SimError::InvalidParameter { ref parameter, .. }) if parameter == "n_sims"
        ));
    }

    #[test]
    fn test_error_display() {
        let error = SimError::InvalidParameter {
            parameter: "strike".to_string(),
            value: -5.0,
            constraint: "must be non-negative".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("strike"));
        assert!(display.contains("-5"));
        assert!(display.contains("non-negative"));
    }

    #[test]
    fn test_degeneracy_display() {
        let error = SimError::NumericDegeneracy {
            method: "GBM path simulation".to_string(),
            reason: "price overflowed to inf".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Numeric degeneracy in GBM path simulation: price overflowed to inf"
        );
    }
}
