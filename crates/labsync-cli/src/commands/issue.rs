// SPDX-License-Identifier: Apache-2.0

//! Issue mutation and upload commands.

use std::path::Path;

use anyhow::{Context, Result};
use labsync_core::{Connector, RepositorySettings, StateEvent};

use super::types::{IssueStateResult, UploadResult};

/// Closes or reopens an issue.
pub fn set_state(
    connector: &Connector,
    settings: &RepositorySettings,
    iid: u64,
    event: StateEvent,
) -> Result<IssueStateResult> {
    let issue = connector.set_issue_state(settings, iid, event)?;
    let project = connector.connection(settings)?.project().path_with_namespace.clone();
    Ok(IssueStateResult { project, issue })
}

/// Uploads a file.
pub fn upload(
    connector: &Connector,
    settings: &RepositorySettings,
    file: &Path,
) -> Result<UploadResult> {
    if !file.is_file() {
        anyhow::bail!("Not a file: {}", file.display());
    }
    let upload = connector
        .upload_attachment(settings, file)
        .with_context(|| format!("Failed to upload {}", file.display()))?;
    let project = connector.connection(settings)?.project().path_with_namespace.clone();
    Ok(UploadResult { project, upload })
}
