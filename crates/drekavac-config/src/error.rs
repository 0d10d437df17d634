//! Preset and state persistence errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong loading, saving or validating a snapshot.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A preset file could not be read.
    #[error("cannot read '{path}': {source}")]
    ReadFile {
        /// File that was being read.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: io::Error,
    },

    /// A preset file could not be written.
    #[error("cannot write '{path}': {source}")]
    WriteFile {
        /// File that was being written.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: io::Error,
    },

    /// A presets directory could not be created.
    #[error("cannot create directory '{path}': {source}")]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: io::Error,
    },

    /// Preset text is not valid TOML for a [`Preset`](crate::Preset).
    #[error("malformed preset: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A preset could not be rendered as TOML.
    #[error("cannot encode preset: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A host state blob is not valid JSON for a [`Preset`](crate::Preset).
    #[error("invalid JSON state: {0}")]
    Json(#[from] serde_json::Error),

    /// No factory preset, user preset or file matches the name.
    #[error("no preset named '{0}'")]
    PresetNotFound(String),

    /// The snapshot parsed but holds unusable values.
    #[error("validation failed: {0}")]
    Validation(#[from] crate::validation::ValidationError),
}

impl ConfigError {
    /// [`ConfigError::ReadFile`] for `path`.
    pub fn read_file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::WriteFile`] for `path`.
    pub fn write_file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::CreateDir`] for `path`.
    pub fn create_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use std::error::Error;
    use std::path::Path;

    fn denied() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "denied")
    }

    #[test]
    fn io_helpers_keep_path() {
        let err = ConfigError::read_file("/presets/warm.preset", denied());
        assert!(matches!(
            &err,
            ConfigError::ReadFile { path, .. } if path == Path::new("/presets/warm.preset")
        ));
        assert_eq!(
            err.to_string(),
            "cannot read '/presets/warm.preset': denied"
        );

        let msg = ConfigError::write_file("/a/b.preset", denied()).to_string();
        assert!(msg.starts_with("cannot write '/a/b.preset'"), "got: {msg}");

        let msg = ConfigError::create_dir("/a", denied()).to_string();
        assert!(msg.starts_with("cannot create directory"), "got: {msg}");
    }

    #[test]
    fn missing_preset_names_it() {
        let err = ConfigError::PresetNotFound("warm".to_string());
        assert_eq!(err.to_string(), "no preset named 'warm'");
    }

    #[test]
    fn json_error_wraps_parser_message() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::from(parse);
        assert!(err.to_string().starts_with("invalid JSON state"));
        assert!(err.source().is_some());
    }

    #[test]
    fn validation_error_converts() {
        let err = ConfigError::from(ValidationError::UnknownParameter("volume".to_string()));
        assert_eq!(
            err.to_string(),
            "validation failed: unknown parameter 'volume'"
        );
    }

    #[test]
    fn only_io_variants_carry_a_source() {
        assert!(ConfigError::read_file("/x", denied()).source().is_some());
        assert!(ConfigError::write_file("/x", denied()).source().is_some());
        assert!(ConfigError::create_dir("/x", denied()).source().is_some());
        assert!(ConfigError::PresetNotFound("p".to_string()).source().is_none());
    }
}
