//! Courier - command-line host
//!
//! Drives the folder tree, the saved requests and the request panel from
//! the terminal.

mod cli;
mod commands;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use courier_infrastructure::{SettingsRepository, StorageDir, SystemClock, open_library};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "COURIER_LOG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings_repo = cli
        .settings
        .clone()
        .map_or_else(SettingsRepository::new, SettingsRepository::at);
    let settings = settings_repo
        .load()
        .await
        .context("failed to load settings")?;

    let storage = StorageDir::resolve(cli.storage_dir.clone(), &settings)?;
    let library = open_library(&storage, &settings, Arc::new(SystemClock::new()))?;
    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        storage = %storage.root().display(),
        "courier started"
    );

    commands::run(cli.command, &commands::Context {
        library,
        settings,
        storage,
    })
    .await
}
