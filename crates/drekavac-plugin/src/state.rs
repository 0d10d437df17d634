//! Host session state and preset files.
//!
//! The host blob is the JSON form of a [`Preset`]:
//!
//! ```json
//! {"name":"Warm","params":{"cutoff":0.55,"drive":2.0,"drywet":0.7,"flavor":0.15,"fold":0.05,"output":1.0,"tone":0.3,"distortion":1.5}}
//! ```
//!
//! Keys are the stable string IDs, so state survives descriptor reordering.
//! Loading parses and validates the whole blob before touching
//! [`DrekavacShared`]; a bad blob leaves every value and the name as they
//! were.

use drekavac_config::{ConfigError, Preset};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::DrekavacShared;

/// Errors from saving or restoring state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The host handed over no bytes.
    #[error("state blob is empty")]
    Empty,

    /// Parse, validation or file error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Serialize current values and preset name for the host.
pub fn save_state(shared: &DrekavacShared) -> Result<Vec<u8>, StateError> {
    let json = shared.snapshot().to_json()?;
    Ok(json.into_bytes())
}

/// Restore values and preset name from a host blob.
pub fn load_state(shared: &DrekavacShared, bytes: &[u8]) -> Result<(), StateError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        tracing::warn!("rejected empty state blob");
        return Err(StateError::Empty);
    }

    let restored = Preset::from_json_slice(bytes).and_then(|preset| {
        shared.restore(&preset)?;
        Ok(preset)
    });

    match restored {
        Ok(preset) => {
            tracing::info!(name = %preset.name, "state restored");
            Ok(())
        }
        Err(err) => {
            tracing::warn!(error = %err, "rejected state blob");
            Err(err.into())
        }
    }
}

/// Save the current state as a `.preset` file and adopt its name.
///
/// The preset name is taken from the file stem and adopted only once the
/// file is written. Returns the path written.
pub fn save_preset_file(shared: &DrekavacShared, path: &Path) -> Result<PathBuf, StateError> {
    let path = drekavac_config::with_preset_extension(path);
    let mut preset = shared.snapshot();
    if let Some(name) = drekavac_config::preset_name_from_path(&path) {
        preset.name = name;
    }
    let written = preset.save(&path)?;
    shared.set_preset_name(preset.name);
    Ok(written)
}

/// Load a `.preset` file into the shared state.
///
/// The file is read, parsed and validated in full before anything changes.
pub fn load_preset_file(shared: &DrekavacShared, path: &Path) -> Result<(), StateError> {
    let preset = Preset::load(path)?;
    shared.restore(&preset).map_err(|err| {
        tracing::warn!(path = %path.display(), error = %err, "rejected preset file");
        StateError::from(err)
    })
}
