//! Streets game client binary.
//!
//! Composition root: reads the environment, installs logging, builds the
//! runtime on top of the file save for the chosen session, and hands control
//! to the line-oriented game loop.
//!
//! # Examples
//!
//! ```bash
//! STREETS_SESSION=alice cargo run -p streets-client
//! ```

mod app;
mod config;
mod input;
mod logging;
mod presentation;

use anyhow::Result;
use runtime::{FileSnapshotRepository, Runtime};

use crate::app::CliApp;
use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(&config.log_dir, &config.session)?;

    tracing::info!(session = %config.session, "starting streets client");
    tracing::info!("content: {}", config.data_dir.display());
    tracing::info!("saves: {}", config.save_dir.display());

    let repository = FileSnapshotRepository::new(&config.save_dir, &config.session)?;
    let mut builder = Runtime::builder()
        .content_dir(&config.data_dir)
        .repository(repository);
    if let Some(seed) = config.seed {
        builder = builder.seed(seed);
    }
    let runtime = builder.build().await?;

    CliApp::new(config, runtime).await?.run().await
}
