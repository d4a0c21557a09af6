// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the labsync CLI.

pub mod issue;
pub mod issues;
pub mod metadata;
pub mod types;
pub mod validate;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use labsync_core::config::RepositoryConfig;
use labsync_core::{AppConfig, Connector, IssueQuery, RepositorySettings, StateEvent};
use tracing::debug;

use crate::cli::{Commands, IssueCommand, OutputContext, RepositoryArgs};
use crate::output;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if ctx.is_interactive() {
        let s = ProgressBar::new_spinner();
        s.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid spinner template"),
        );
        s.set_message(message.to_string());
        s.enable_steady_tick(Duration::from_millis(100));
        Some(s)
    } else {
        None
    }
}

/// Runs `f` behind a spinner, clearing it whatever the outcome.
fn with_spinner<T>(ctx: &OutputContext, message: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let spinner = maybe_spinner(ctx, message);
    let result = f();
    if let Some(s) = spinner {
        s.finish_and_clear();
    }
    result
}

/// Merges command-line overrides into the configured repository.
pub fn resolve_settings(args: &RepositoryArgs, config: &AppConfig) -> Result<RepositorySettings> {
    let configured = &config.repository;
    let merged = RepositoryConfig {
        url: args.url.clone().or_else(|| configured.url.clone()),
        username: args.username.clone().or_else(|| configured.username.clone()),
        password: configured.password.clone(),
        use_private_token: args.private_token || configured.use_private_token,
        base_url: args.base_url.clone().or_else(|| configured.base_url.clone()),
        auth_method: configured.auth_method,
    };
    Ok(merged.to_settings()?)
}

/// Dispatch to the appropriate command handler.
pub fn run(
    command: Commands,
    repository: &RepositoryArgs,
    ctx: &OutputContext,
    config: &AppConfig,
) -> Result<()> {
    let settings = resolve_settings(repository, config)?;
    debug!(url = %settings.url, private_token = settings.use_private_token, "Resolved repository settings");
    let connector = Connector::new(&config.http)?;

    match command {
        Commands::Validate => {
            let result = with_spinner(ctx, "Validating repository...", || {
                validate::run(&connector, &settings)
            })?;
            output::render(&result, ctx)
        }

        Commands::Issues {
            assignee,
            milestone,
            labels,
            state,
            notes,
            retry_timeouts,
        } => {
            let (opened, closed) = state.flags();
            let query = IssueQuery::new(
                assignee.unwrap_or_default(),
                milestone.unwrap_or_default(),
                opened,
                closed,
                labels.as_slice(),
            )?;
            let result = with_spinner(ctx, "Fetching issues...", || {
                issues::run(&connector, &settings, &query, notes, retry_timeouts)
            })?;
            output::render(&result, ctx)
        }

        Commands::Milestones { refresh } => {
            let result = with_spinner(ctx, "Fetching milestones...", || {
                metadata::milestones(&connector, &settings, refresh)
            })?;
            output::render(&result, ctx)
        }

        Commands::Members { refresh } => {
            let result = with_spinner(ctx, "Fetching members...", || {
                metadata::members(&connector, &settings, refresh)
            })?;
            output::render(&result, ctx)
        }

        Commands::Issue(issue_cmd) => {
            let (iid, event) = match issue_cmd {
                IssueCommand::Close { iid } => (iid, StateEvent::Close),
                IssueCommand::Reopen { iid } => (iid, StateEvent::Reopen),
            };
            let result = with_spinner(ctx, "Updating issue...", || {
                issue::set_state(&connector, &settings, iid, event)
            })?;
            output::render(&result, ctx)
        }

        Commands::Upload { file } => {
            let result = with_spinner(ctx, "Uploading file...", || {
                issue::upload(&connector, &settings, &file)
            })?;
            output::render(&result, ctx)
        }
    }
}
