//! Configuration errors.

use crate::schema::{Kind, ParseValueError};
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while materializing a configuration.
///
/// Only [`ConfigError::InvalidSchema`] and [`ConfigError::Cli`] abort a load.
/// The rest are collected in the load report while the affected source or
/// field is skipped.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The schema descriptor breaks a structural invariant.
    #[error("invalid configuration schema: {0}")]
    InvalidSchema(String),

    /// Command-line parsing failed, or help/version output was requested.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// A field has no description and gets no command-line switch.
    #[error("field '{field}' has no description and is not exposed as a switch")]
    MissingDescription { field: String },

    /// Failed to read the snapshot file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot file is not a JSON object.
    #[error("failed to parse config file '{path}': {source}")]
    ParseFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A snapshot entry holds a JSON value of the wrong type.
    #[error("config file '{path}': field '{field}' is not a {expected}")]
    FieldType { path: PathBuf, field: String, expected: Kind },

    /// An environment variable does not parse as its field's kind.
    #[error("invalid value for environment variable '{name}': {source}")]
    EnvParse {
        name: String,
        #[source]
        source: ParseValueError,
    },

    /// Failed to serialize the snapshot.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to create the snapshot directory.
    #[error("failed to create config directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the snapshot file.
    #[error("failed to write config file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema(message.into())
    }

    /// Creates a missing description error.
    pub fn missing_description(field: impl Into<String>) -> Self {
        Self::MissingDescription { field: field.into() }
    }

    /// Creates a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile { path: path.into(), source }
    }

    /// Creates a parse file error.
    pub fn parse_file(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ParseFile { path: path.into(), source }
    }

    /// Creates a field type error.
    pub fn field_type(path: impl Into<PathBuf>, field: impl Into<String>, expected: Kind) -> Self {
        Self::FieldType { path: path.into(), field: field.into(), expected }
    }

    /// Creates an environment parse error.
    pub fn env_parse(name: impl Into<String>, source: ParseValueError) -> Self {
        Self::EnvParse { name: name.into(), source }
    }

    /// Creates a create dir error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir { path: path.into(), source }
    }

    /// Creates a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFile { path: path.into(), source }
    }

    /// Whether this error aborts a load rather than skipping one source or field.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidSchema(_) | Self::Cli(_))
    }
}
