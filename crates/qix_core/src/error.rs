use thiserror::Error;

/// Errors surfaced by a session object store.
///
/// `NotFound` and `AccessDenied` are per-object conditions: the inventory
/// walker absorbs them locally and the affected subtree contributes nothing.
/// Everything else is a store-level failure and propagates to the caller.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}
