//! Snapshot persistence for per-object layouts and the final inventory
//! document.
//!
//! The sink is an injected side channel: the walker calls it when present
//! and logs failures without letting them touch traversal results. The
//! filesystem implementation mirrors the layout-dump format of the original
//! tooling: `viz_<id>.json` per object, `sheet-layout_<id>.json` +
//! `sheet-properties_<id>.json` per sheet, `object-library.json` for the
//! summary.

use std::fs;
use std::path::{Path, PathBuf};

use qix_core::{ObjectLayout, ObjectProperties};
use thiserror::Error;

use super::types::InventorySummary;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Receives snapshots as the walk progresses. Implementations must not
/// influence traversal; the walker only logs their errors.
pub trait SnapshotSink: Send + Sync {
    fn record_object(&self, object_id: &str, layout: &ObjectLayout) -> Result<(), SnapshotError>;

    fn record_sheet(
        &self,
        sheet_id: &str,
        properties: &ObjectProperties,
        layout: &ObjectLayout,
    ) -> Result<(), SnapshotError>;

    fn record_summary(&self, summary: &InventorySummary) -> Result<(), SnapshotError>;
}

/// Writes snapshots as pretty-printed JSON files under one directory.
#[derive(Debug)]
pub struct FsSnapshotSink {
    dir: PathBuf,
}

impl FsSnapshotSink {
    /// Create the sink, clearing any previous snapshot directory so each run
    /// starts from an empty dump.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, SnapshotError> {
        let dir = dir.into();
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_json<T: serde::Serialize>(&self, file_name: &str, value: &T) -> Result<(), SnapshotError> {
        let data = serde_json::to_vec_pretty(value)?;
        fs::write(self.dir.join(file_name), data)?;
        Ok(())
    }
}

impl SnapshotSink for FsSnapshotSink {
    fn record_object(&self, object_id: &str, layout: &ObjectLayout) -> Result<(), SnapshotError> {
        self.write_json(&format!("viz_{}.json", sanitize_object_id(object_id)), layout)
    }

    fn record_sheet(
        &self,
        sheet_id: &str,
        properties: &ObjectProperties,
        layout: &ObjectLayout,
    ) -> Result<(), SnapshotError> {
        let id = sanitize_object_id(sheet_id);
        self.write_json(&format!("sheet-layout_{}.json", id), layout)?;
        self.write_json(&format!("sheet-properties_{}.json", id), properties)
    }

    fn record_summary(&self, summary: &InventorySummary) -> Result<(), SnapshotError> {
        self.write_json("object-library.json", summary)
    }
}

/// Make an object id filesystem-safe: every character outside
/// `[A-Za-z0-9-]` becomes `_`.
pub fn sanitize_object_id(object_id: &str) -> String {
    object_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
