//! Wire-shaped object records.
//!
//! These map the engine's property/layout documents field-for-field, so raw
//! JSON from a session (or a saved snapshot) deserializes without massaging.
//! Optional fields default rather than error: structural absence is not a
//! failure at this boundary.

use serde::{Deserialize, Serialize};

/// Identity block carried by both properties and layouts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object id. May be empty on synthetic entries; callers treat empty as absent.
    #[serde(rename = "qId", default)]
    pub id: String,

    #[serde(rename = "qType", default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
}

/// One child slot in a container's `cells` list. The slot references its
/// child object through `name`; the remaining fields are grid geometry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colspan: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rowspan: Option<u32>,
}

impl CellRef {
    /// Child object id, if the slot carries a non-empty one.
    pub fn child_id(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// The declarative definition of an object, as stored in the app.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectProperties {
    #[serde(rename = "qInfo", default, skip_serializing_if = "Option::is_none")]
    pub info: Option<ObjectInfo>,

    /// Reference to a reusable master-item definition this object extends.
    #[serde(rename = "qExtendsId", default, skip_serializing_if = "Option::is_none")]
    pub extends_id: Option<String>,

    /// Ordered child slots (containers and sheets).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<CellRef>,
}

impl ObjectProperties {
    /// Non-empty extends reference, if any.
    pub fn master_item_ref(&self) -> Option<&str> {
        self.extends_id.as_deref().filter(|s| !s.is_empty())
    }
}

/// Metadata block on computed layouts (`qMeta`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Child references discovered at render time (`qChildList`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChildList {
    #[serde(rename = "qItems", default)]
    pub items: Vec<ChildItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChildItem {
    #[serde(rename = "qInfo", default, skip_serializing_if = "Option::is_none")]
    pub info: Option<ObjectInfo>,
}

impl ChildItem {
    /// Referenced child id, if present and non-empty.
    pub fn child_id(&self) -> Option<&str> {
        self.info
            .as_ref()
            .map(|i| i.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

/// The computed (rendered) view of an object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectLayout {
    #[serde(rename = "qInfo", default, skip_serializing_if = "Option::is_none")]
    pub info: Option<ObjectInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "qMeta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<LayoutMeta>,

    /// Rendering-engine type tag ("barchart", "kpi", ...). Absent for pure
    /// containers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualization: Option<String>,

    #[serde(rename = "qChildList", default, skip_serializing_if = "Option::is_none")]
    pub child_list: Option<ChildList>,
}

impl ObjectLayout {
    /// Display title with the fallback chain: direct `title`, then
    /// `qMeta.title`. Empty strings count as absent.
    pub fn display_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| {
                self.meta
                    .as_ref()
                    .and_then(|m| m.title.as_deref())
                    .filter(|t| !t.is_empty())
            })
    }
}

/// One entry of the session's sheet list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetListEntry {
    #[serde(rename = "qInfo", default)]
    pub info: ObjectInfo,

    #[serde(rename = "qMeta", default)]
    pub meta: LayoutMeta,
}

impl SheetListEntry {
    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or("")
    }
}

/// A resolved top-level sheet: identity plus its loaded properties. This is
/// the walker's input; resolution happens at the session boundary.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub id: String,
    pub title: String,
    pub properties: ObjectProperties,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn properties_deserialize_wire_names() {
        let json = r#"{
            "qInfo": { "qId": "obj-1", "qType": "container" },
            "qExtendsId": "MI-9",
            "cells": [
                { "name": "child-a", "col": 0, "row": 0, "colspan": 12, "rowspan": 6 },
                { "col": 0, "row": 6 }
            ]
        }"#;
        let props: ObjectProperties = serde_json::from_str(json).unwrap();
        assert_eq!(props.info.as_ref().unwrap().id, "obj-1");
        assert_eq!(props.master_item_ref(), Some("MI-9"));
        assert_eq!(props.cells.len(), 2);
        assert_eq!(props.cells[0].child_id(), Some("child-a"));
        assert_eq!(props.cells[1].child_id(), None);
    }

    #[test]
    fn empty_extends_ref_is_absent() {
        let props = ObjectProperties {
            extends_id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(props.master_item_ref(), None);
    }

    #[test]
    fn layout_deserialize_wire_names() {
        let json = r#"{
            "qInfo": { "qId": "obj-2" },
            "title": "",
            "qMeta": { "title": "KPI Widget" },
            "visualization": "kpi",
            "qChildList": { "qItems": [ { "qInfo": { "qId": "nested-1" } }, {} ] }
        }"#;
        let layout: ObjectLayout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.display_title(), Some("KPI Widget"));
        assert_eq!(layout.visualization.as_deref(), Some("kpi"));
        let list = layout.child_list.as_ref().unwrap();
        assert_eq!(list.items[0].child_id(), Some("nested-1"));
        assert_eq!(list.items[1].child_id(), None);
    }

    #[test]
    fn display_title_prefers_direct_title() {
        let layout = ObjectLayout {
            title: Some("Chart A".into()),
            meta: Some(LayoutMeta {
                title: Some("meta title".into()),
                description: None,
            }),
            ..Default::default()
        };
        assert_eq!(layout.display_title(), Some("Chart A"));
    }

    #[test]
    fn display_title_none_when_both_empty() {
        let layout = ObjectLayout {
            title: Some(String::new()),
            meta: Some(LayoutMeta::default()),
            ..Default::default()
        };
        assert_eq!(layout.display_title(), None);
    }

    #[test]
    fn sheet_list_entry_accessors() {
        let json = r#"{ "qInfo": { "qId": "SH-1" }, "qMeta": { "title": "Overview" } }"#;
        let entry: SheetListEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id(), "SH-1");
        assert_eq!(entry.title(), "Overview");

        let bare: SheetListEntry = serde_json::from_str(r#"{ "qInfo": { "qId": "SH-2" } }"#).unwrap();
        assert_eq!(bare.title(), "");
    }
}
