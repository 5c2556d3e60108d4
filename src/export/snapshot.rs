//! JSON snapshot export and import.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::adaptation::AdaptationPack;
use crate::climate::ClimateInputs;
use crate::pipeline::{DerivedProfile, Generation};

/// Application name recorded in snapshot metadata.
pub const APP_NAME: &str = "AR.ClimateWorldBuilder";
/// Snapshot format version.
pub const SNAPSHOT_VERSION: &str = "0.2";

/// Errors that can occur during snapshot export or import.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed snapshot: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("Snapshot encoding error: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotMeta {
    pub app: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl SnapshotMeta {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            app: APP_NAME.to_string(),
            version: SNAPSHOT_VERSION.to_string(),
            timestamp,
        }
    }
}

/// Flattened record of one generation: inputs, derived fields, adaptations and both texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    pub meta: SnapshotMeta,
    pub inputs: ClimateInputs,
    pub derived: DerivedProfile,
    pub adaptations: AdaptationPack,
    pub prompt: String,
    pub syntax: String,
}

impl Snapshot {
    pub fn from_generation(generation: &Generation, timestamp: DateTime<Utc>) -> Self {
        Self {
            meta: SnapshotMeta::new(timestamp),
            inputs: generation.inputs.clone(),
            derived: generation.derived.clone(),
            adaptations: generation.adaptations.clone(),
            prompt: generation.prompt.clone(),
            syntax: generation.syntax.clone(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(SnapshotError::Encode)
    }

    /// Parse a snapshot. Missing keys, unknown keys, wrong types and unknown
    /// labels are all [`SnapshotError::Malformed`].
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(SnapshotError::Malformed)
    }
}

/// Write a snapshot as pretty-printed JSON.
pub fn export_snapshot_json(snapshot: &Snapshot, path: &Path) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, snapshot).map_err(SnapshotError::Encode)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(path = %path.display(), "snapshot exported");
    Ok(())
}

/// Read a snapshot. Derivation is not re-run; callers decide whether to.
pub fn import_snapshot_json(path: &Path) -> Result<Snapshot, SnapshotError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: Snapshot = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            SnapshotError::Io(e.into())
        } else {
            SnapshotError::Malformed(e)
        }
    })?;

    info!(
        path = %path.display(),
        world = snapshot.inputs.world_label(),
        version = %snapshot.meta.version,
        "snapshot imported"
    );
    Ok(snapshot)
}
