//! App object inventory
//!
//! This module provides:
//! - The recursive object-tree walker with cycle-safe traversal
//! - The inventory report document (`object-library.json` shape)
//! - Plain-text report rendering
//! - Snapshot persistence for per-object layouts and the summary

pub mod report;
pub mod snapshot;
pub mod types;
pub mod walker;

pub use snapshot::{FsSnapshotSink, SnapshotSink};
pub use types::{InventoryEntry, InventorySummary, MasterItemUsage, SheetEntry, VizTypeCount};
pub use walker::{run_inventory, InventoryWalker, COMPOUND_CONTEXT_MARKER};
