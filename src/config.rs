//! Runtime configuration, read from the environment (optionally via `.env`).
//!
//! Variables:
//! - `APP_ID` - identifier of the app being inventoried (names the snapshot
//!   directory)
//! - `APP_FIXTURE` - path to the JSON fixture document backing the
//!   in-process session
//! - `SAVE_LAYOUTS` - `"true"` enables snapshot persistence (default: off)
//! - `LAYOUTS_DIR` - snapshot root directory (default: `layouts`)

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct InventoryConfig {
    pub app_id: String,
    pub fixture_path: PathBuf,
    pub save_layouts: bool,
    pub layouts_root: PathBuf,
}

impl InventoryConfig {
    pub fn from_env() -> Result<Self> {
        let app_id = env::var("APP_ID").context("APP_ID must be set")?;
        let fixture_path = env::var("APP_FIXTURE")
            .context("APP_FIXTURE must be set")?
            .into();
        let save_layouts = env::var("SAVE_LAYOUTS")
            .map(|v| save_layouts_enabled(&v))
            .unwrap_or(false);
        let layouts_root = env::var("LAYOUTS_DIR")
            .unwrap_or_else(|_| "layouts".to_owned())
            .into();

        Ok(Self {
            app_id,
            fixture_path,
            save_layouts,
            layouts_root,
        })
    }

    /// Effective snapshot directory for this app.
    pub fn layouts_dir(&self) -> PathBuf {
        self.layouts_root.join(&self.app_id)
    }
}

/// Only the literal `"true"` enables persistence.
fn save_layouts_enabled(value: &str) -> bool {
    value == "true"
}
