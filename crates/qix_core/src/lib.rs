//! Engine object model: the data boundary between inventory tooling and an
//! analytics-engine session.
//!
//! This crate defines:
//! - `ObjectProperties` / `ObjectLayout` - typed views of an object's stored
//!   definition and its computed (rendered) state
//! - `SheetListEntry` / `Sheet` - top-level sheet descriptors
//! - `EngineError` - the error taxonomy shared by every session implementation
//!
//! Everything here is plain data: no I/O, no session protocol. Field names
//! follow the engine's wire format (`qInfo`, `qMeta`, `qExtendsId`, ...) so
//! that raw property/layout documents deserialize directly.

pub mod error;
pub mod objects;

pub use error::EngineError;
pub use objects::{
    CellRef, ChildItem, ChildList, LayoutMeta, ObjectInfo, ObjectLayout, ObjectProperties, Sheet,
    SheetListEntry,
};
