//! Preset and state persistence for drekavac.
//!
//! - **Presets**: named parameter snapshots as TOML `.preset` files
//! - **State blobs**: the same snapshot as JSON for host sessions
//! - **Validation**: strict checks before a snapshot replaces live values
//! - **Paths**: the user presets directory
//! - **Factory presets**: built-in starting points
//!
//! # Example
//!
//! ```rust,no_run
//! use drekavac_config::{Preset, get_factory_preset, user_presets_dir};
//!
//! let warm = get_factory_preset("warm").unwrap();
//! let params = warm.to_params().unwrap();
//!
//! let mine = Preset::from_params("Mine", &params).with_description("warm, but mine");
//! mine.save(user_presets_dir().join("mine")).unwrap();
//! ```

mod error;
mod preset;

/// Platform-specific preset locations.
#[cfg(feature = "std")]
pub mod paths;

/// Preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
#[cfg(feature = "std")]
pub use paths::{
    ensure_user_presets_dir, find_preset, find_preset_in, list_presets_in_dir, list_user_presets,
    load_preset, load_preset_in, preset_name_from_path, user_presets_dir,
};
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use preset::{
    DEFAULT_PRESET_NAME, PRESET_EXTENSION, Preset, UNKNOWN_PRESET_NAME, with_preset_extension,
};
pub use validation::{ValidationError, ValidationResult, validate_param, validate_preset};
