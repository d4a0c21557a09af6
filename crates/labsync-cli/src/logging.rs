// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the labsync CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Default: warnings only
//! labsync issues
//!
//! # Debug output for troubleshooting
//! RUST_LOG=labsync_core=debug labsync issues
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::OutputFormat;

/// Initialize the logging subsystem.
///
/// Logs go to stderr so structured output on stdout stays parseable.
/// `-v` raises the default level to `info` for text output; `RUST_LOG`
/// always wins.
pub fn init_logging(format: OutputFormat, verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let structured = matches!(format, OutputFormat::Json | OutputFormat::Yaml);
    let default_filter = if verbose && !structured {
        "labsync=info,labsync_core=info,reqwest=error"
    } else {
        "labsync=warn,labsync_core=warn,reqwest=error"
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
