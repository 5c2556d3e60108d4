//! Export module for saving and loading climate profiles.
//!
//! Supports full JSON snapshots (inputs, derived fields, adaptations and both
//! rendered texts) and a plain-text summary.

mod snapshot;
mod text;

pub use snapshot::{
    export_snapshot_json, import_snapshot_json, Snapshot, SnapshotError, SnapshotMeta, APP_NAME,
    SNAPSHOT_VERSION,
};
pub use text::{export_summary_txt, summary_text};
