//! Error types shared across the filter core.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load an effect (shader program) file.
///
/// A load failure is never retried: the filter instance that hit it stays in
/// pass-through mode for its whole lifetime.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("effect file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read effect file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse effect {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("effect {} has no `{entry_point}` entry point", path.display())]
    MissingEntryPoint { path: PathBuf, entry_point: String },
}

/// Failure to decode a settings snapshot.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("settings root must be a JSON object")]
    NotAnObject,
}

/// Filter registration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown filter id: {0}")]
    UnknownFilter(String),

    #[error("filter id already registered: {0}")]
    Duplicate(String),
}
