//! Platform-specific preset locations.
//!
//! User presets live in `<config>/drekavac/presets/`:
//!
//! - Linux: `~/.config/drekavac/presets/`
//! - macOS: `~/Library/Application Support/drekavac/presets/`
//! - Windows: `%APPDATA%\drekavac\presets\`
//!
//! # Example
//!
//! ```rust,no_run
//! use drekavac_config::paths;
//!
//! for path in paths::list_user_presets() {
//!     println!("{}", path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::preset::{PRESET_EXTENSION, with_preset_extension};
use crate::{ConfigError, Preset, get_factory_preset};

/// Application name used for directory paths.
const APP_NAME: &str = "drekavac";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific presets directory.
///
/// Falls back to `./drekavac/presets` if the config directory cannot be
/// determined.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Find a preset file by path or name.
///
/// An existing file path wins; otherwise the name (with `.preset` appended
/// when missing) is looked up in the user presets directory.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &user_presets_dir())
}

/// [`find_preset`] against an explicit directory.
pub fn find_preset_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let candidate = dir.join(with_preset_extension(Path::new(name)));
    candidate.is_file().then_some(candidate)
}

/// Load a preset by file path, factory name, or user preset name.
///
/// # Errors
///
/// See [`load_preset_in`].
pub fn load_preset(name: &str) -> Result<Preset, ConfigError> {
    load_preset_in(name, &user_presets_dir())
}

/// [`load_preset`] with `dir` standing in for the user presets directory.
///
/// An existing file path wins, then a factory preset (case-insensitive),
/// then `<dir>/<name>.preset`.
///
/// # Errors
///
/// [`ConfigError::PresetNotFound`] when nothing matches, or the read or
/// parse error of the matching file.
pub fn load_preset_in(name: &str, dir: &Path) -> Result<Preset, ConfigError> {
    let path = Path::new(name);
    if path.is_file() {
        return Preset::load(path);
    }
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }
    match find_preset_in(name, dir) {
        Some(found) => Preset::load(found),
        None => Err(ConfigError::PresetNotFound(name.to_string())),
    }
}

/// Ensure the user presets directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_presets_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_presets_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// List `.preset` files in the user presets directory.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// List `.preset` files in `dir`, sorted by path.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext == PRESET_EXTENSION)
        })
        .collect();
    presets.sort();
    presets
}

/// Get the preset name from a file path (the file stem).
///
/// # Example
///
/// ```rust
/// use drekavac_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/warm.preset"));
/// assert_eq!(name, Some("warm".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
