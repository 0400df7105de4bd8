//! In-process session: a `HashMap` object store behind the `SessionObjects`
//! trait. Used by tests and by the demo binary, which loads it from a JSON
//! fixture document:
//!
//! ```json
//! {
//!   "sheets": ["SH-1", "SH-2"],
//!   "objects": {
//!     "SH-1": { "properties": { ... }, "layout": { ... } },
//!     "obj-1": { "properties": { ... }, "layout": { ... } }
//!   }
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use qix_core::{EngineError, LayoutMeta, ObjectLayout, ObjectProperties, SheetListEntry};

use crate::{Result, SessionObjects};

#[derive(Debug, Clone, Default, Deserialize)]
struct StoredObject {
    #[serde(default)]
    properties: ObjectProperties,
    #[serde(default)]
    layout: ObjectLayout,
}

/// Fixture document shape accepted by [`InProcessSession::from_fixture`].
#[derive(Debug, Default, Deserialize)]
struct AppFixture {
    #[serde(default)]
    sheets: Vec<String>,
    #[serde(default)]
    objects: HashMap<String, StoredObject>,
}

/// In-memory `SessionObjects` implementation.
#[derive(Debug, Default)]
pub struct InProcessSession {
    objects: HashMap<String, StoredObject>,
    sheet_ids: Vec<String>,
    denied: HashSet<String>,
}

impl InProcessSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object with its properties and layout.
    pub fn insert_object(
        &mut self,
        object_id: impl Into<String>,
        properties: ObjectProperties,
        layout: ObjectLayout,
    ) {
        self.objects
            .insert(object_id.into(), StoredObject { properties, layout });
    }

    /// Append a sheet id to the session's sheet list. The sheet object itself
    /// must also be registered via [`insert_object`](Self::insert_object).
    pub fn push_sheet(&mut self, sheet_id: impl Into<String>) {
        self.sheet_ids.push(sheet_id.into());
    }

    /// Mark an object id as access-denied. Fetches for it fail even if the
    /// object is registered.
    pub fn deny_object(&mut self, object_id: impl Into<String>) {
        self.denied.insert(object_id.into());
    }

    /// Build a session from a parsed fixture document.
    pub fn from_fixture(fixture: serde_json::Value) -> Result<Self> {
        let fixture: AppFixture = serde_json::from_value(fixture)
            .map_err(|e| EngineError::Protocol(format!("invalid app fixture: {}", e)))?;
        tracing::debug!(
            sheets = fixture.sheets.len(),
            objects = fixture.objects.len(),
            "loaded in-process session fixture"
        );
        Ok(Self {
            objects: fixture.objects,
            sheet_ids: fixture.sheets,
            denied: HashSet::new(),
        })
    }

    /// Load a fixture document from disk.
    pub fn from_fixture_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read app fixture {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| EngineError::Protocol(format!("invalid app fixture JSON: {}", e)))?;
        Self::from_fixture(value)
    }

    fn lookup(&self, object_id: &str) -> Result<&StoredObject> {
        if self.denied.contains(object_id) {
            return Err(EngineError::AccessDenied(object_id.to_owned()));
        }
        self.objects
            .get(object_id)
            .ok_or_else(|| EngineError::NotFound(object_id.to_owned()))
    }
}

#[async_trait]
impl SessionObjects for InProcessSession {
    async fn object_properties(&self, object_id: &str) -> Result<ObjectProperties> {
        self.lookup(object_id).map(|o| o.properties.clone())
    }

    async fn object_layout(&self, object_id: &str) -> Result<ObjectLayout> {
        self.lookup(object_id).map(|o| o.layout.clone())
    }

    async fn sheet_list(&self) -> Result<Vec<SheetListEntry>> {
        self.sheet_ids
            .iter()
            .map(|id| {
                let stored = self.lookup(id)?;
                // Sheet titles live in the layout: qMeta when present, the
                // direct title otherwise.
                let meta = match &stored.layout.meta {
                    Some(meta) => meta.clone(),
                    None => LayoutMeta {
                        title: stored.layout.title.clone(),
                        description: None,
                    },
                };
                Ok(SheetListEntry {
                    info: qix_core::ObjectInfo {
                        id: id.clone(),
                        object_type: Some("sheet".to_owned()),
                    },
                    meta,
                })
            })
            .collect()
    }
}
