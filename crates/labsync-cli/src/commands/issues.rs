// SPDX-License-Identifier: Apache-2.0

//! Issues command.

use anyhow::Result;
use backon::BlockingRetryable;
use labsync_core::{Connector, IssueQuery, QuerySummary, RepositorySettings};
use tracing::warn;

use super::types::IssuesResult;
use crate::retry::{is_retryable, timeout_backoff};

/// Runs a query, optionally retrying on timeouts.
pub fn run(
    connector: &Connector,
    settings: &RepositorySettings,
    query: &IssueQuery,
    include_notes: bool,
    retry_timeouts: bool,
) -> Result<IssuesResult> {
    let fetch = || {
        let mut records = Vec::new();
        connector
            .perform_query(settings, query, include_notes, |record| records.push(record))
            .map(|_| records)
    };

    let issues = if retry_timeouts {
        fetch
            .retry(timeout_backoff())
            .when(is_retryable)
            .notify(|err, dur| {
                warn!(error = %err, retry_after = ?dur, "Retrying issue query after timeout");
            })
            .call()?
    } else {
        fetch()?
    };

    let connection = connector.connection(settings)?;
    let metadata = connection.metadata();
    let mut warnings = Vec::new();
    if !query.assignee().is_empty() && metadata.find_member(query.assignee()).is_none() {
        warnings.push(format!("No project member named '{}'", query.assignee()));
    }
    if !query.milestone().is_empty() && metadata.find_milestone(query.milestone()).is_none() {
        warnings.push(format!("No milestone titled '{}'", query.milestone()));
    }

    Ok(IssuesResult {
        project: connection.project().path_with_namespace.clone(),
        query: QuerySummary::from(query),
        total_count: issues.len(),
        issues,
        warnings,
    })
}
