// SPDX-License-Identifier: Apache-2.0

//! labsync - query and update issues on self-hosted GitLab.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;
mod retry;

use anyhow::{Context, Result};
use clap::Parser;
use labsync_core::config;
use tracing::debug;

use crate::cli::{Cli, OutputContext};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.output, cli.verbose);

    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet, cli.verbose);

    let config = config::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    match commands::run(cli.command, &cli.repository, &output_ctx, &config) {
        Ok(()) => Ok(()),
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            std::process::exit(1);
        }
    }
}
