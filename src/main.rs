//! Car Sales - Sales Record Keeping, Analysis & Charts
//!
//! An interactive console application for recording car sales to a CSV
//! table, summarizing them per brand and charting the results.

mod charts;
mod cli;
mod config;
mod data;
mod stats;

use anyhow::Context;
use cli::{Console, SalesApp};
use config::{AppConfig, CONFIG_FILE};
use std::io;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so prompts on stdout stay readable
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::load(Path::new(CONFIG_FILE))
        .with_context(|| format!("failed to load {}", CONFIG_FILE))?;
    tracing::debug!(?config, "configuration loaded");

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    let mut app = SalesApp::new(&config, console);
    app.run().context("console I/O failed")?;

    Ok(())
}
