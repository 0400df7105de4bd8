//! App object inventory - walk every sheet of an app, list all reachable
//! objects, and print the inventory report.
//!
//! Usage:
//!   APP_ID=my-app APP_FIXTURE=tests/fixtures/sample_app.json cargo run --bin app_inventory
//!   SAVE_LAYOUTS=true additionally dumps per-object layouts and
//!   object-library.json under LAYOUTS_DIR (default: layouts/<APP_ID>).

use anyhow::Result;
use app_inventory::config::InventoryConfig;
use app_inventory::inventory::{report, walker::run_inventory, FsSnapshotSink, SnapshotSink};
use qix_session::InProcessSession;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let config = InventoryConfig::from_env()?;
    let session = InProcessSession::from_fixture_path(&config.fixture_path)?;

    let fs_sink;
    let sink: Option<&dyn SnapshotSink> = if config.save_layouts {
        fs_sink = FsSnapshotSink::create(config.layouts_dir())?;
        println!("Saving layouts to: {}", fs_sink.dir().display());
        Some(&fs_sink)
    } else {
        None
    };

    let summary = run_inventory(&session, sink).await?;
    print!("{}", report::render_report(&summary));

    Ok(())
}
