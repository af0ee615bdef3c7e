//! DataView - headless driver for the file view
//!
//! Lists a directory through a list, tree or icon view, replays key presses
//! and prints the resulting rows and notifications as JSON lines.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    view_log::init_with(view_log::LogOptions {
        console: args.verbose,
        ..Default::default()
    })?;

    if let Err(e) = view_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("DataView starting...");

    let config = view_core::FileViewConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration: {}", e);
        Default::default()
    });

    let result = cli::run(args, config);
    if let Err(e) = &result {
        tracing::error!("{:#}", e);
        cli::report(e);
    }
    result
}
