// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for labsync.
//!
//! Uses clap's derive API for declarative CLI parsing with noun-verb
//! subcommands.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// YAML output for programmatic consumption
    Yaml,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, json, yaml)
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners, progress)
    pub quiet: bool,
    /// Enable verbose output
    pub verbose: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool, verbose: bool) -> Self {
        Self {
            format,
            quiet,
            verbose,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, colors) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// labsync - query and update issues on self-hosted GitLab.
///
/// Connection settings come from `~/.config/labsync/config.toml` and
/// `LABSYNC_*` environment variables; the flags below override them.
#[derive(Parser)]
#[command(name = "labsync")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format (text, json, yaml)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinners, progress)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub repository: RepositoryArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the configured repository.
#[derive(Args, Clone, Default)]
pub struct RepositoryArgs {
    /// Project URL (e.g. <https://gitlab.example.com/group/project>)
    #[arg(long = "repo", global = true)]
    pub url: Option<String>,

    /// Username for the password grant
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Host URL for installations under a path prefix
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Treat the configured password as a private token
    #[arg(long, global = true)]
    pub private_token: bool,
}

/// Issue states accepted by `labsync issues`.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum StateFilter {
    /// Open issues only
    #[default]
    Open,
    /// Closed issues only
    Closed,
    /// Open and closed issues
    All,
}

impl StateFilter {
    /// Returns `(opened, closed)` flags.
    pub fn flags(self) -> (bool, bool) {
        match self {
            StateFilter::Open => (true, false),
            StateFilter::Closed => (false, true),
            StateFilter::All => (true, true),
        }
    }
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check credentials and resolve the configured project
    Validate,

    /// List issues matching a query
    Issues {
        /// Assignee username or display name
        #[arg(long)]
        assignee: Option<String>,

        /// Milestone title
        #[arg(long)]
        milestone: Option<String>,

        /// Label pattern (regular expression, repeatable)
        #[arg(long = "label")]
        labels: Vec<String>,

        /// Issue state
        #[arg(long, default_value = "open", value_enum)]
        state: StateFilter,

        /// Fetch notes for each matching issue
        #[arg(long)]
        notes: bool,

        /// Retry the query when the server times out
        #[arg(long)]
        retry_timeouts: bool,
    },

    /// List project milestones
    Milestones {
        /// Reload from the server
        #[arg(long)]
        refresh: bool,
    },

    /// List project and group members
    Members {
        /// Reload from the server
        #[arg(long)]
        refresh: bool,
    },

    /// Change an issue
    #[command(subcommand)]
    Issue(IssueCommand),

    /// Upload a file to the project
    Upload {
        /// File to upload
        file: PathBuf,
    },
}

/// Issue subcommands.
#[derive(Subcommand)]
pub enum IssueCommand {
    /// Close an issue
    Close {
        /// Project-scoped issue number
        iid: u64,
    },
    /// Reopen an issue
    Reopen {
        /// Project-scoped issue number
        iid: u64,
    },
}
