//! Preset file format and operations.

use drekavac_effects::ControlParams;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::validation::validate_preset;

/// File extension for preset files.
pub const PRESET_EXTENSION: &str = "preset";

/// Name given to a fresh preset.
pub const DEFAULT_PRESET_NAME: &str = "Default";

/// Name given to a loaded preset that carries none.
pub const UNKNOWN_PRESET_NAME: &str = "Unknown";

fn unknown_name() -> String {
    UNKNOWN_PRESET_NAME.to_string()
}

/// A named snapshot of control values.
///
/// Stored as TOML on disk and as JSON in host state blobs. Both use the same
/// shape: a name, an optional description and a flat table from stable
/// parameter ID to value. Keys missing from the table keep their defaults
/// when applied.
///
/// # TOML Format
///
/// ```toml
/// name = "Warm"
/// description = "Low drive, dark tone"
///
/// [params]
/// drive = 2.0
/// tone = 0.3
/// cutoff = 0.55
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    #[serde(default = "unknown_name")]
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter ID to value.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
}

impl Default for Preset {
    fn default() -> Self {
        Self::from_params(DEFAULT_PRESET_NAME, &ControlParams::default())
    }
}

impl Preset {
    /// Create a preset with no parameter entries.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: BTreeMap::new(),
        }
    }

    /// Capture every control value under `name`.
    pub fn from_params(name: impl Into<String>, params: &ControlParams) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: params
                .iter()
                .map(|(id, value)| (id.to_string(), value))
                .collect(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set one parameter entry.
    pub fn with_param(mut self, id: impl Into<String>, value: f32) -> Self {
        self.params.insert(id.into(), value);
        self
    }

    /// Validate, then apply the entries on top of the defaults.
    ///
    /// Nothing is produced unless every entry passes; the caller's state is
    /// only replaced with a fully checked value set.
    pub fn to_params(&self) -> Result<ControlParams, ConfigError> {
        validate_preset(self)?;
        let mut params = ControlParams::default();
        for (id, &value) in &self.params {
            params.set_by_id(id, value);
        }
        Ok(params)
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset = Self::from_toml(&content)?;
        tracing::info!(name = %preset.name, path = %path.display(), "preset loaded");
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the preset to a TOML file.
    ///
    /// Appends `.preset` when the path has no such extension and creates
    /// missing parent directories. Returns the path actually written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf, ConfigError> {
        let path = with_preset_extension(path.as_ref());

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(&path, content).map_err(|e| ConfigError::write_file(&path, e))?;
        tracing::info!(name = %self.name, path = %path.display(), "preset saved");
        Ok(path)
    }

    /// Parse a JSON state blob.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON state blob from raw bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serialize to a compact JSON state blob.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Append `.preset` unless the path already ends with it.
pub fn with_preset_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == PRESET_EXTENSION) {
        path.to_path_buf()
    } else {
        let mut os = path.as_os_str().to_owned();
        os.push(".");
        os.push(PRESET_EXTENSION);
        PathBuf::from(os)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    #[test]
    fn default_captures_every_control() {
        let preset = Preset::default();
        assert_eq!(preset.name, DEFAULT_PRESET_NAME);
        assert_eq!(preset.params.len(), drekavac_effects::PARAM_COUNT);
        assert_eq!(preset.params["cutoff"], 0.75);
        assert_eq!(preset.to_params().unwrap(), ControlParams::default());
    }

    #[test]
    fn missing_name_becomes_unknown() {
        let preset = Preset::from_toml("[params]\ndrive = 3.0\n").unwrap();
        assert_eq!(preset.name, UNKNOWN_PRESET_NAME);
        assert_eq!(preset.params["drive"], 3.0);
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let preset = Preset::new("Sparse").with_param("fold", 0.9);
        let params = preset.to_params().unwrap();
        assert_eq!(params.fold, 0.9);
        assert_eq!(params.drive, 1.0);
        assert_eq!(params.drywet, 0.5);
    }

    #[test]
    fn invalid_entries_are_rejected() {
        let preset = Preset::new("Bad").with_param("volume", 1.0);
        match preset.to_params() {
            Err(ConfigError::Validation(ValidationError::UnknownParameter(id))) => {
                assert_eq!(id, "volume");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn toml_roundtrip_is_exact() {
        let params = ControlParams {
            drive: 3.3,
            cutoff: 0.123_456_7,
            ..ControlParams::default()
        };
        let preset = Preset::from_params("Exact", &params).with_description("round trip");
        let parsed = Preset::from_toml(&preset.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, preset);
        assert_eq!(parsed.to_params().unwrap(), params);
    }

    #[test]
    fn json_roundtrip_is_exact() {
        let preset = Preset::from_params("Blob", &ControlParams::default());
        let json = preset.to_json().unwrap();
        assert_eq!(Preset::from_json(&json).unwrap(), preset);
        assert_eq!(Preset::from_json_slice(json.as_bytes()).unwrap(), preset);
    }

    #[test]
    fn corrupt_json_is_an_error() {
        assert!(matches!(Preset::from_json("{\"params\":"), Err(ConfigError::Json(_))));
        assert!(Preset::from_json_slice(b"\xff\xfe").is_err());
    }

    #[test]
    fn extension_is_appended_once() {
        assert_eq!(
            with_preset_extension(Path::new("dir/warm")),
            PathBuf::from("dir/warm.preset")
        );
        assert_eq!(
            with_preset_extension(Path::new("warm.preset")),
            PathBuf::from("warm.preset")
        );
        assert_eq!(
            with_preset_extension(Path::new("warm.toml")),
            PathBuf::from("warm.toml.preset")
        );
    }
}
