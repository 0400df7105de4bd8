//! Inventory report document.
//!
//! These types serialize to the `object-library.json` document; field names
//! are camelCase to match the emitted JSON exactly, so the serde renames here
//! are part of the output contract.

use serde::{Deserialize, Serialize};

/// One visited object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    pub id: String,
    pub title: String,

    /// Rendering type tag; absent for pure containers (and omitted from the
    /// JSON document when absent).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    pub is_master_item: bool,

    /// The extends reference when the object carries a non-empty one. Set
    /// independently of `is_master_item`: compound-context wrappers keep the
    /// reference but are not classified as master-item instances.
    pub master_item_id: Option<String>,

    /// Depth below the sheet root (direct sheet children are depth 0).
    pub depth: u32,

    /// Sheet whose traversal first reached this object.
    pub sheet_id: String,
}

/// One visited sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetEntry {
    pub id: String,
    pub title: String,

    /// Raw child-slot count of the sheet, including slots with no object id.
    pub object_count: usize,
}

/// One placement of a master item on a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLocation {
    pub sheet_id: String,
    pub sheet_title: String,
    pub object_id: String,
    pub object_title: String,
}

/// All placements of one master item, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterItemUsage {
    pub master_item_id: String,
    pub usage_count: usize,
    pub usages: Vec<UsageLocation>,
}

/// Occurrence count for one visualization type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VizTypeCount {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: usize,
}

/// Aggregate totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_sheets: usize,
    pub total_objects: usize,
    pub unique_visualization_types: usize,
    pub master_items_used: usize,
}

/// The full inventory of one walk: every sheet, every distinct object
/// reached, master-item usage in first-use order, and visualization type
/// counts sorted by descending count (insertion order among ties).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub sheets: Vec<SheetEntry>,
    pub objects: Vec<InventoryEntry>,
    pub master_item_usage: Vec<MasterItemUsage>,
    pub visualization_types: Vec<VizTypeCount>,
    pub summary: SummaryTotals,
}
