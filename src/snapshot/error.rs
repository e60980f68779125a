//! Snapshot error types.

use crate::core::ModelError;
use std::io;
use thiserror::Error;

/// Errors that can occur while saving or restoring an automaton
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot data does not describe a consistent automaton
    #[error("Snapshot validation failed: {0}")]
    ValidationFailed(#[from] ModelError),

    /// The file is a command script, not a structured snapshot
    #[error("'{0}' is a command script, not a snapshot")]
    NotASnapshot(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
