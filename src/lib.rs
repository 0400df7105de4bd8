//! app-inventory - Object inventory tooling for analytics-app sessions
//!
//! Given a session's sheets, the walker discovers every reachable object at
//! unlimited depth (cycle-safe), classifies master-item instances, tallies
//! visualization types, and emits both a plain-text report and a JSON
//! inventory document.
//!
//! The session itself is abstracted behind `qix_session::SessionObjects`;
//! this crate never speaks a wire protocol.

// Env-driven runtime configuration
pub mod config;

// Walker, report document, rendering, snapshot sink
pub mod inventory;
