//! Typed configuration errors
//!
//! The engine itself has no failure paths. Everything that can go wrong comes
//! from user-supplied configuration (colours, gradients, bindings, numbers),
//! and is reported through [`ConfigError`] before any engine is built.

use thiserror::Error;

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid color '{0}': expected #RRGGBB, #RRGGBBAA or [r, g, b(, a)]")]
    InvalidColor(String),

    #[error("gradient needs at least 2 stops, got {0}")]
    GradientTooShort(usize),

    #[error("unknown key name '{0}'")]
    UnknownKey(String),

    #[error("unknown gamepad button '{0}'")]
    UnknownGamepadButton(String),

    #[error("duplicate action id '{0}'")]
    DuplicateAction(String),

    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
}

impl ConfigError {
    /// Check `value` lies strictly between 0 and 1
    pub fn check_unit_open(field: &'static str, value: f32) -> Result<(), ConfigError> {
        if value > 0.0 && value < 1.0 {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                field,
                expected: "in (0, 1)",
                value,
            })
        }
    }

    /// Check `value` is a finite number greater than 0
    pub fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                field,
                expected: "> 0",
                value,
            })
        }
    }

    /// Check `value` lies within `[min, max]`
    pub fn check_between(
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
        expected: &'static str,
    ) -> Result<(), ConfigError> {
        if value >= min && value <= max {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                field,
                expected,
                value,
            })
        }
    }

    /// Check `value` is a finite number greater than or equal to 0
    pub fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                field,
                expected: ">= 0",
                value,
            })
        }
    }
}
