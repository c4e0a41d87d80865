//! Rigby - fleet financial metrics for small trucking operations
//!
//! A CLI tool that turns imported loads and expenses into per-driver and
//! fleet-wide revenue, cost per mile and profit figures.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use tracing::Level;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
