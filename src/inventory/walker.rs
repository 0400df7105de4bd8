//! Recursive object-tree inventory walker.
//!
//! Starting from a sheet's child slots, the walker discovers every reachable
//! object through two child sources (properties-level `cells` and
//! layout-level `qChildList`), classifies each object, and accumulates the
//! inventory. A single visited set shared across all sheets guarantees
//! termination on cyclic graphs and makes shared objects count exactly once.
//!
//! Fetches are strictly sequential: one object in flight at a time, siblings
//! visited one after another. The visited set and the accumulators live on
//! the walker and never escape one run.

use std::collections::HashSet;

use futures::future::{BoxFuture, FutureExt};
use qix_core::Sheet;
use qix_session::SessionObjects;

use super::snapshot::SnapshotSink;
use super::types::{
    InventoryEntry, InventorySummary, MasterItemUsage, SheetEntry, SummaryTotals, UsageLocation,
    VizTypeCount,
};

/// Id marker of synthetic compound-context wrappers. These inherit an
/// extends reference from the object they wrap, so they are excluded from
/// master-item classification.
pub const COMPOUND_CONTEXT_MARKER: &str = "qlik-compound-context";

const UNTITLED: &str = "Untitled";

/// One inventory run over a session.
///
/// Owns all mutable traversal state; create one per run and consume it with
/// [`walk`](Self::walk).
pub struct InventoryWalker<'a, S: SessionObjects + ?Sized> {
    session: &'a S,
    sink: Option<&'a dyn SnapshotSink>,
    visited: HashSet<String>,
    sheets: Vec<SheetEntry>,
    objects: Vec<InventoryEntry>,
    // Insertion-ordered accumulators; report-sized data, so linear lookup.
    master_items: Vec<(String, Vec<UsageLocation>)>,
    viz_types: Vec<(String, usize)>,
    total_objects: usize,
}

impl<'a, S: SessionObjects + ?Sized> InventoryWalker<'a, S> {
    pub fn new(session: &'a S, sink: Option<&'a dyn SnapshotSink>) -> Self {
        Self {
            session,
            sink,
            visited: HashSet::new(),
            sheets: Vec::new(),
            objects: Vec::new(),
            master_items: Vec::new(),
            viz_types: Vec::new(),
            total_objects: 0,
        }
    }

    /// Walk every sheet in input order and build the inventory.
    ///
    /// The visited set spans the whole run: an object shared between sheets
    /// is attributed to whichever sheet reaches it first.
    pub async fn walk(mut self, sheets: &[Sheet]) -> InventorySummary {
        for sheet in sheets {
            tracing::info!(sheet_id = %sheet.id, title = %sheet.title, "walking sheet");
            self.sheets.push(SheetEntry {
                id: sheet.id.clone(),
                title: sheet.title.clone(),
                object_count: sheet.properties.cells.len(),
            });
            for cell in &sheet.properties.cells {
                if let Some(child_id) = cell.child_id() {
                    let count = self.visit(child_id, 0, &sheet.id, &sheet.title).await;
                    self.total_objects += count;
                }
            }
        }
        self.finish()
    }

    /// Visit one object and everything reachable beneath it. Returns the
    /// number of objects successfully recorded in this subtree.
    fn visit<'b>(
        &'b mut self,
        object_id: &'b str,
        depth: u32,
        sheet_id: &'b str,
        sheet_title: &'b str,
    ) -> BoxFuture<'b, usize> {
        async move {
            // Mark before fetching: a failed fetch still consumes the id for
            // the rest of the run.
            if !self.visited.insert(object_id.to_owned()) {
                return 0;
            }

            let properties = match self.session.object_properties(object_id).await {
                Ok(p) => p,
                Err(err) => {
                    tracing::warn!(object_id, error = %err, "object unreachable, skipping subtree");
                    return 0;
                }
            };
            let layout = match self.session.object_layout(object_id).await {
                Ok(l) => l,
                Err(err) => {
                    tracing::warn!(object_id, error = %err, "object unreachable, skipping subtree");
                    return 0;
                }
            };

            if let Some(sink) = self.sink {
                if let Err(err) = sink.record_object(object_id, &layout) {
                    tracing::warn!(object_id, error = %err, "failed to snapshot object layout");
                }
            }

            let title = layout.display_title().unwrap_or(UNTITLED).to_owned();

            if let Some(kind) = layout.visualization.as_deref().filter(|t| !t.is_empty()) {
                self.bump_viz_type(kind);
            }

            let master_item_id = properties.master_item_ref().map(str::to_owned);
            let is_master_item =
                master_item_id.is_some() && !object_id.contains(COMPOUND_CONTEXT_MARKER);

            if is_master_item {
                if let Some(ref master_id) = master_item_id {
                    self.record_usage(
                        master_id,
                        UsageLocation {
                            sheet_id: sheet_id.to_owned(),
                            sheet_title: sheet_title.to_owned(),
                            object_id: object_id.to_owned(),
                            object_title: title.clone(),
                        },
                    );
                }
            }

            tracing::debug!(object_id, title = %title, depth, "visited object");
            self.objects.push(InventoryEntry {
                id: object_id.to_owned(),
                title,
                object_type: layout.visualization.clone(),
                is_master_item,
                master_item_id,
                depth,
                sheet_id: sheet_id.to_owned(),
            });

            // Union of the two child sources, deduplicated, insertion order:
            // properties-level slots first, then layout-level children.
            let mut child_ids: Vec<String> = Vec::new();
            let mut seen: HashSet<&str> = HashSet::new();
            for cell in &properties.cells {
                if let Some(id) = cell.child_id() {
                    if seen.insert(id) {
                        child_ids.push(id.to_owned());
                    }
                }
            }
            if let Some(list) = &layout.child_list {
                for item in &list.items {
                    if let Some(id) = item.child_id() {
                        if seen.insert(id) {
                            child_ids.push(id.to_owned());
                        }
                    }
                }
            }
            drop(seen);

            let mut child_count = 0usize;
            for child_id in &child_ids {
                child_count += self.visit(child_id, depth + 1, sheet_id, sheet_title).await;
            }

            1 + child_count
        }
        .boxed()
    }

    fn bump_viz_type(&mut self, kind: &str) {
        match self.viz_types.iter_mut().find(|(k, _)| k == kind) {
            Some((_, count)) => *count += 1,
            None => self.viz_types.push((kind.to_owned(), 1)),
        }
    }

    fn record_usage(&mut self, master_item_id: &str, usage: UsageLocation) {
        match self
            .master_items
            .iter_mut()
            .find(|(id, _)| id == master_item_id)
        {
            Some((_, usages)) => usages.push(usage),
            None => self
                .master_items
                .push((master_item_id.to_owned(), vec![usage])),
        }
    }

    fn finish(self) -> InventorySummary {
        let master_item_usage: Vec<MasterItemUsage> = self
            .master_items
            .into_iter()
            .map(|(master_item_id, usages)| MasterItemUsage {
                master_item_id,
                usage_count: usages.len(),
                usages,
            })
            .collect();

        let mut visualization_types: Vec<VizTypeCount> = self
            .viz_types
            .into_iter()
            .map(|(kind, count)| VizTypeCount { kind, count })
            .collect();
        // Stable sort keeps first-seen order among equal counts.
        visualization_types.sort_by(|a, b| b.count.cmp(&a.count));

        let summary = SummaryTotals {
            total_sheets: self.sheets.len(),
            total_objects: self.total_objects,
            unique_visualization_types: visualization_types.len(),
            master_items_used: master_item_usage.len(),
        };

        InventorySummary {
            sheets: self.sheets,
            objects: self.objects,
            master_item_usage,
            visualization_types,
            summary,
        }
    }
}

/// Run a full inventory against a session: enumerate sheets, resolve their
/// properties, walk everything, and (when a sink is given) persist per-sheet
/// snapshots plus the final summary document.
///
/// Sheet enumeration and sheet resolution failures are fatal; per-object
/// failures below the sheets are absorbed by the walker. The sink is a pure
/// side channel: its failures are logged and never change the result.
pub async fn run_inventory<S: SessionObjects + ?Sized>(
    session: &S,
    sink: Option<&dyn SnapshotSink>,
) -> qix_session::Result<InventorySummary> {
    let sheet_list = session.sheet_list().await?;

    let mut sheets = Vec::with_capacity(sheet_list.len());
    for entry in &sheet_list {
        let properties = session.object_properties(entry.id()).await?;
        if let Some(sink) = sink {
            let layout = session.object_layout(entry.id()).await?;
            if let Err(err) = sink.record_sheet(entry.id(), &properties, &layout) {
                tracing::warn!(sheet_id = entry.id(), error = %err, "failed to snapshot sheet");
            }
        }
        sheets.push(Sheet {
            id: entry.id().to_owned(),
            title: entry.title().to_owned(),
            properties,
        });
    }

    let summary = InventoryWalker::new(session, sink).walk(&sheets).await;

    if let Some(sink) = sink {
        if let Err(err) = sink.record_summary(&summary) {
            tracing::warn!(error = %err, "failed to snapshot inventory summary");
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qix_core::{CellRef, ChildItem, ChildList, LayoutMeta, ObjectInfo, ObjectLayout, ObjectProperties};
    use qix_session::InProcessSession;

    fn cells(names: &[&str]) -> Vec<CellRef> {
        names
            .iter()
            .map(|n| CellRef {
                name: Some((*n).to_owned()),
                ..Default::default()
            })
            .collect()
    }

    fn child_list(ids: &[&str]) -> ChildList {
        ChildList {
            items: ids
                .iter()
                .map(|id| ChildItem {
                    info: Some(ObjectInfo {
                        id: (*id).to_owned(),
                        object_type: None,
                    }),
                })
                .collect(),
        }
    }

    fn props_with_cells(names: &[&str]) -> ObjectProperties {
        ObjectProperties {
            cells: cells(names),
            ..Default::default()
        }
    }

    fn titled_layout(title: &str, viz: &str) -> ObjectLayout {
        ObjectLayout {
            title: Some(title.to_owned()),
            visualization: Some(viz.to_owned()),
            ..Default::default()
        }
    }

    fn sheet(id: &str, title: &str, child_names: &[&str]) -> Sheet {
        Sheet {
            id: id.to_owned(),
            title: title.to_owned(),
            properties: props_with_cells(child_names),
        }
    }

    #[tokio::test]
    async fn cycle_terminates_and_visits_each_once() {
        let mut session = InProcessSession::new();
        session.insert_object(
            "a",
            props_with_cells(&["b"]),
            titled_layout("A", "container"),
        );
        session.insert_object(
            "b",
            props_with_cells(&["a"]),
            titled_layout("B", "container"),
        );

        let summary = InventoryWalker::new(&session, None)
            .walk(&[sheet("SH-1", "Loop", &["a"])])
            .await;

        assert_eq!(summary.summary.total_objects, 2);
        let ids: Vec<_> = summary.objects.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(summary.objects[1].depth, 1);
    }

    #[tokio::test]
    async fn shared_object_attributed_to_first_sheet() {
        let mut session = InProcessSession::new();
        session.insert_object("x", ObjectProperties::default(), titled_layout("X", "kpi"));

        let sheets = [
            sheet("SH-1", "First", &["x"]),
            sheet("SH-2", "Second", &["x"]),
        ];
        let summary = InventoryWalker::new(&session, None).walk(&sheets).await;

        assert_eq!(summary.summary.total_objects, 1);
        assert_eq!(summary.objects.len(), 1);
        assert_eq!(summary.objects[0].sheet_id, "SH-1");
        // Both sheets still list their slot.
        assert_eq!(summary.sheets[0].object_count, 1);
        assert_eq!(summary.sheets[1].object_count, 1);
    }

    #[tokio::test]
    async fn child_union_covers_both_sources_in_order() {
        let mut session = InProcessSession::new();
        session.insert_object(
            "root",
            props_with_cells(&["a", "b"]),
            ObjectLayout {
                title: Some("Root".into()),
                child_list: Some(child_list(&["b", "c"])),
                ..Default::default()
            },
        );
        for id in ["a", "b", "c"] {
            session.insert_object(
                id,
                ObjectProperties::default(),
                titled_layout(&id.to_uppercase(), "kpi"),
            );
        }

        let summary = InventoryWalker::new(&session, None)
            .walk(&[sheet("SH-1", "Union", &["root"])])
            .await;

        let ids: Vec<_> = summary.objects.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "b", "c"]);
        assert_eq!(summary.summary.total_objects, 4);
    }

    #[tokio::test]
    async fn title_fallback_chain() {
        let mut session = InProcessSession::new();
        session.insert_object(
            "direct",
            ObjectProperties::default(),
            titled_layout("Direct", "kpi"),
        );
        session.insert_object(
            "meta",
            ObjectProperties::default(),
            ObjectLayout {
                title: Some(String::new()),
                meta: Some(LayoutMeta {
                    title: Some("From Meta".into()),
                    description: None,
                }),
                ..Default::default()
            },
        );
        session.insert_object("bare", ObjectProperties::default(), ObjectLayout::default());

        let summary = InventoryWalker::new(&session, None)
            .walk(&[sheet("SH-1", "Titles", &["direct", "meta", "bare"])])
            .await;

        let titles: Vec<_> = summary.objects.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["Direct", "From Meta", "Untitled"]);
    }

    #[tokio::test]
    async fn compound_context_wrapper_not_a_master_item() {
        let mut session = InProcessSession::new();
        let extends = ObjectProperties {
            extends_id: Some("MI-1".into()),
            ..Default::default()
        };
        session.insert_object("plain", extends.clone(), titled_layout("Plain", "kpi"));
        session.insert_object(
            "qlik-compound-context-7",
            extends,
            titled_layout("Wrapped", "kpi"),
        );

        let summary = InventoryWalker::new(&session, None)
            .walk(&[sheet(
                "SH-1",
                "Masters",
                &["plain", "qlik-compound-context-7"],
            )])
            .await;

        assert!(summary.objects[0].is_master_item);
        assert!(!summary.objects[1].is_master_item);
        // The wrapper keeps its extends reference even though unclassified.
        assert_eq!(summary.objects[1].master_item_id.as_deref(), Some("MI-1"));

        assert_eq!(summary.master_item_usage.len(), 1);
        let usage = &summary.master_item_usage[0];
        assert_eq!(usage.master_item_id, "MI-1");
        assert_eq!(usage.usage_count, 1);
        assert_eq!(usage.usages[0].object_id, "plain");
        assert_eq!(usage.usages[0].sheet_title, "Masters");
    }

    #[tokio::test]
    async fn unreachable_child_contributes_zero() {
        let mut session = InProcessSession::new();
        session.insert_object(
            "parent",
            props_with_cells(&["ghost"]),
            titled_layout("Parent", "container"),
        );

        let summary = InventoryWalker::new(&session, None)
            .walk(&[sheet("SH-1", "Gaps", &["parent"])])
            .await;

        assert_eq!(summary.summary.total_objects, 1);
        assert_eq!(summary.objects.len(), 1);
        assert_eq!(summary.objects[0].id, "parent");
    }

    #[tokio::test]
    async fn denied_subtree_is_absorbed() {
        let mut session = InProcessSession::new();
        session.insert_object(
            "parent",
            props_with_cells(&["secret"]),
            titled_layout("Parent", "container"),
        );
        session.insert_object(
            "secret",
            props_with_cells(&["below"]),
            titled_layout("Secret", "kpi"),
        );
        session.insert_object("below", ObjectProperties::default(), titled_layout("Below", "kpi"));
        session.deny_object("secret");

        let summary = InventoryWalker::new(&session, None)
            .walk(&[sheet("SH-1", "Denied", &["parent"])])
            .await;

        // The denied object and everything beneath it vanish silently.
        assert_eq!(summary.summary.total_objects, 1);
        assert_eq!(summary.objects[0].id, "parent");
    }

    #[tokio::test]
    async fn viz_types_sorted_by_count_then_first_seen() {
        let mut session = InProcessSession::new();
        session.insert_object("k1", ObjectProperties::default(), titled_layout("K1", "kpi"));
        session.insert_object(
            "b1",
            ObjectProperties::default(),
            titled_layout("B1", "barchart"),
        );
        session.insert_object(
            "b2",
            ObjectProperties::default(),
            titled_layout("B2", "barchart"),
        );
        session.insert_object(
            "t1",
            ObjectProperties::default(),
            titled_layout("T1", "table"),
        );

        let summary = InventoryWalker::new(&session, None)
            .walk(&[sheet("SH-1", "Counts", &["k1", "b1", "b2", "t1"])])
            .await;

        let kinds: Vec<_> = summary
            .visualization_types
            .iter()
            .map(|v| (v.kind.as_str(), v.count))
            .collect();
        // barchart leads with 2; kpi precedes table because it was seen first.
        assert_eq!(kinds, vec![("barchart", 2), ("kpi", 1), ("table", 1)]);
        assert_eq!(summary.summary.unique_visualization_types, 3);
    }

    #[tokio::test]
    async fn empty_cell_names_are_skipped() {
        let mut session = InProcessSession::new();
        session.insert_object("real", ObjectProperties::default(), titled_layout("Real", "kpi"));

        let sheet = Sheet {
            id: "SH-1".into(),
            title: "Sparse".into(),
            properties: ObjectProperties {
                cells: vec![
                    CellRef::default(),
                    CellRef {
                        name: Some(String::new()),
                        ..Default::default()
                    },
                    CellRef {
                        name: Some("real".into()),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
        };

        let summary = InventoryWalker::new(&session, None).walk(&[sheet]).await;
        assert_eq!(summary.summary.total_objects, 1);
        // objectCount reflects raw slots, not visited objects.
        assert_eq!(summary.sheets[0].object_count, 3);
    }
}
