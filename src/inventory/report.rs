//! Plain-text rendering of an [`InventorySummary`].
//!
//! Rendering is a pure function of the summary, so the section layout and
//! the traversal-derived ordering are directly testable. Sections follow the
//! report produced by the original tooling: per-sheet object tree, totals,
//! master-item usage grouped by sheet, visualization type distribution.

use std::fmt::{self, Write};

use super::types::{InventorySummary, MasterItemUsage};

const RULE: &str = "==================================================";

/// Render the complete report.
pub fn render_report(summary: &InventorySummary) -> String {
    let mut out = String::new();
    render(&mut out, summary).expect("formatting into a String cannot fail");
    out
}

fn render<W: Write>(w: &mut W, summary: &InventorySummary) -> fmt::Result {
    render_tree(w, summary)?;
    render_totals(w, summary)?;
    if !summary.master_item_usage.is_empty() {
        render_master_items(w, summary)?;
    }
    if !summary.visualization_types.is_empty() {
        render_viz_types(w, summary)?;
    }
    Ok(())
}

/// Per-sheet object listing, indented by traversal depth.
pub fn render_tree<W: Write>(w: &mut W, summary: &InventorySummary) -> fmt::Result {
    for sheet in &summary.sheets {
        writeln!(w)?;
        writeln!(w, "Sheet: {}", sheet.title)?;
        writeln!(w, "└─ Sheet has {} object(s):", sheet.object_count)?;
        for entry in summary.objects.iter().filter(|o| o.sheet_id == sheet.id) {
            let indent = format!("  {}", "     ".repeat(entry.depth as usize));
            writeln!(w, "{}- Object ID: {}", indent, entry.id)?;
            writeln!(w, "{}  Name: {}", indent, entry.title)?;
            writeln!(
                w,
                "{}  Type: {}",
                indent,
                entry.object_type.as_deref().unwrap_or("-")
            )?;
            if entry.is_master_item {
                if let Some(master_id) = entry.master_item_id.as_deref() {
                    writeln!(w, "{}  Master Item ID: {}", indent, master_id)?;
                }
            }
        }
    }
    Ok(())
}

fn render_totals<W: Write>(w: &mut W, summary: &InventorySummary) -> fmt::Result {
    writeln!(w)?;
    writeln!(w, "{}", RULE)?;
    writeln!(w, "Summary:")?;
    writeln!(w, "  Total Sheets: {}", summary.summary.total_sheets)?;
    writeln!(w, "  Total Objects: {}", summary.summary.total_objects)?;
    writeln!(w, "{}", RULE)?;
    Ok(())
}

fn render_master_items<W: Write>(w: &mut W, summary: &InventorySummary) -> fmt::Result {
    writeln!(w)?;
    writeln!(w, "{}", RULE)?;
    writeln!(w, "Master Item Usage:")?;
    writeln!(w, "{}", RULE)?;
    for usage in &summary.master_item_usage {
        render_one_master_item(w, usage)?;
    }
    Ok(())
}

fn render_one_master_item<W: Write>(w: &mut W, usage: &MasterItemUsage) -> fmt::Result {
    writeln!(w)?;
    writeln!(w, "Master Item ID: {}", usage.master_item_id)?;
    writeln!(w, "  Used {} time(s):", usage.usage_count)?;

    // Group usages by sheet, keeping first-seen sheet order.
    let mut by_sheet: Vec<(&str, &str, Vec<&super::types::UsageLocation>)> = Vec::new();
    for location in &usage.usages {
        match by_sheet.iter_mut().find(|(id, _, _)| *id == location.sheet_id) {
            Some((_, _, locations)) => locations.push(location),
            None => by_sheet.push((
                location.sheet_id.as_str(),
                location.sheet_title.as_str(),
                vec![location],
            )),
        }
    }

    for (sheet_id, sheet_title, locations) in by_sheet {
        writeln!(w, "  └─ Sheet: \"{}\" ({})", sheet_title, sheet_id)?;
        writeln!(w, "     {} instance(s)", locations.len())?;
        for location in locations {
            writeln!(
                w,
                "       - {}: \"{}\"",
                location.object_id, location.object_title
            )?;
        }
    }
    Ok(())
}

fn render_viz_types<W: Write>(w: &mut W, summary: &InventorySummary) -> fmt::Result {
    writeln!(w)?;
    writeln!(w, "{}", RULE)?;
    writeln!(w, "Visualization Type Distribution:")?;
    writeln!(w, "{}", RULE)?;
    for viz in &summary.visualization_types {
        writeln!(w, "  {}: {}", viz.kind, viz.count)?;
    }
    Ok(())
}
