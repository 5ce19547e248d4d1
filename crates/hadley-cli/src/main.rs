#![forbid(unsafe_code)]

//! # Hadley CLI
//!
//! Build-time tooling for Hadley themes.
//!
//! ## Usage
//!
//! ```bash
//! hadley validate                  # Check every theme
//! hadley themes --json             # Theme metadata for docs
//! hadley css --out-dir dist        # One stylesheet per theme
//! hadley preset > preset.json      # Utility-class preset
//! hadley check-classes bg-brand-500 hover:text-error-600
//! ```

mod cli;
mod commands;
mod config;
mod logging;
mod storage;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use cli::Cli;
use config::Config;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    logging::init(cli.verbose, cli.json_logs, !cli.no_color);

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    commands::run(&cli.command, &config)
}
