//! Saving and restoring automata.
//!
//! Two forms are supported:
//! - **Script**: the automaton re-emitted as commands. Replaying the script
//!   through a [`Dispatcher`](crate::command::Dispatcher) rebuilds it.
//! - **Snapshot**: a versioned structured capture of the whole model, stored
//!   as binary (bincode) or JSON, restored without replay.
//!
//! The form is chosen from the file extension, see [`SnapshotFormat`].

use crate::core::{Automaton, AutomatonData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

pub mod error;
mod script;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk representation of a saved automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// Replayable command script
    Script,
    /// bincode snapshot (`.fs`, `.bin`)
    Binary,
    /// JSON snapshot (`.json`)
    Json,
}

impl SnapshotFormat {
    /// Pick the format from a file extension; unknown extensions are scripts.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("fs") | Some("bin") => Self::Binary,
            Some("json") => Self::Json,
            _ => Self::Script,
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Script => f.write_str("script"),
            Self::Binary => f.write_str("binary"),
            Self::Json => f.write_str("JSON"),
        }
    }
}

/// Serializable snapshot of an automaton.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub created_at: DateTime<Utc>,

    /// The captured model
    pub automaton: AutomatonData,
}

impl Snapshot {
    /// Capture the current state of an automaton.
    pub fn capture(automaton: &Automaton) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            automaton: automaton.to_data(),
        }
    }

    /// Rebuild the automaton, validating every model invariant.
    pub fn restore(self) -> Result<Automaton, SnapshotError> {
        Ok(Automaton::restore(self.automaton)?)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    /// Read a snapshot file in the given structured format.
    pub fn read(path: &Path, format: SnapshotFormat) -> Result<Self, SnapshotError> {
        match format {
            SnapshotFormat::Binary => Self::from_bytes(&fs::read(path)?),
            SnapshotFormat::Json => Self::from_json(&fs::read_to_string(path)?),
            SnapshotFormat::Script => Err(SnapshotError::NotASnapshot(path.display().to_string())),
        }
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}

/// Save `automaton` to `path` in the format its extension selects.
///
/// The file is written to a temporary sibling first and renamed into place,
/// so an interrupted save never leaves a truncated file behind.
pub fn save(automaton: &Automaton, path: &Path) -> Result<SnapshotFormat, SnapshotError> {
    let format = SnapshotFormat::from_path(path);
    let bytes = match format {
        SnapshotFormat::Script => automaton.to_script().into_bytes(),
        SnapshotFormat::Binary => Snapshot::capture(automaton).to_bytes()?,
        SnapshotFormat::Json => Snapshot::capture(automaton).to_json()?.into_bytes(),
    };

    let temp_path = temp_path(path);
    fs::write(&temp_path, bytes)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            warn!(
                path = %temp_path.display(),
                error = %cleanup,
                "failed to remove temporary file"
            );
        }
        return Err(e.into());
    }

    debug!(path = %path.display(), %format, "saved automaton");
    Ok(format)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
