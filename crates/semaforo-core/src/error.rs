//! Core error types for semaforo-core.
//!
//! The timer itself never fails; these cover configuration, input
//! validation and the audio backend.

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::Phase;

/// Core error type for semaforo-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Could not determine a configuration directory")]
    NoDataDir,
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Unknown modality '{0}' (expected protocolo, informe or custom)")]
    UnknownModality(String),

    /// Durations are fixed once a run has started.
    #[error("Cannot change durations while the {phase} phase is in progress")]
    RunInProgress { phase: Phase },
}

/// Audio backend errors. Never surfaced past the cue dispatcher.
#[derive(Error, Debug)]
pub enum CueError {
    #[error("Audio output unavailable: {0}")]
    Unavailable(String),

    #[error("Audio IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
