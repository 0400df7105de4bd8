//! SessionObjects trait: the sole boundary between inventory tooling and an
//! engine session. Consumers depend on this crate, never on a concrete
//! transport.
//!
//! The only implementation shipped here is [`InProcessSession`], an in-memory
//! object store loadable from a JSON fixture document. A live session backed
//! by the vendor SDK plugs in behind the same trait.

pub mod inprocess;

use async_trait::async_trait;
use qix_core::{EngineError, ObjectLayout, ObjectProperties, SheetListEntry};

pub use inprocess::InProcessSession;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Read-only access to a session's object store.
///
/// All fetches are snapshots; nothing here mutates remote state. Per-object
/// errors (`NotFound`, `AccessDenied`) are local conditions the caller may
/// absorb; `sheet_list` failure means the session itself is unusable.
#[async_trait]
pub trait SessionObjects: Send + Sync {
    /// Declared properties of an object, including its child slots.
    async fn object_properties(&self, object_id: &str) -> Result<ObjectProperties>;

    /// Computed layout of an object, including render-time children.
    async fn object_layout(&self, object_id: &str) -> Result<ObjectLayout>;

    /// Top-level sheets of the current app, in presentation order.
    async fn sheet_list(&self) -> Result<Vec<SheetListEntry>>;
}
