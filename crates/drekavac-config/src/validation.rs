//! Preset validation.
//!
//! Presets are checked strictly before anything is applied: every key must
//! name a known control, and every value must be finite and inside the
//! control's declared range. Host automation is clamped instead; only
//! persisted snapshots go through here.
//!
//! # Example
//!
//! ```rust
//! use drekavac_config::{Preset, ValidationError, validate_preset};
//!
//! let preset = Preset::new("Loud").with_param("output", 5.0);
//! assert!(matches!(
//!     validate_preset(&preset),
//!     Err(ValidationError::OutOfRange { .. })
//! ));
//! ```

use drekavac_effects::params;
use thiserror::Error;

use crate::Preset;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Key does not name a control.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// String ID of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// NaN or infinite value.
    #[error("parameter '{0}' is not a finite number")]
    NonFinite(String),

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check a single `id = value` pair.
pub fn validate_param(id: &str, value: f32) -> ValidationResult<()> {
    let desc =
        params::descriptor(id).ok_or_else(|| ValidationError::UnknownParameter(id.to_string()))?;

    if !value.is_finite() {
        return Err(ValidationError::NonFinite(id.to_string()));
    }

    if value >= desc.min && value <= desc.max {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            param: id.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        })
    }
}

/// Check every entry of a preset.
///
/// A single failure is returned as-is; several are wrapped in
/// [`ValidationError::Multiple`] in key order.
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors: Vec<ValidationError> = preset
        .params
        .iter()
        .filter_map(|(id, &value)| validate_param(id, value).err())
        .collect();

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
