// SPDX-License-Identifier: Apache-2.0

//! Validate command.

use anyhow::Result;
use labsync_core::{Connector, RepositorySettings};

use super::types::ValidateResult;

/// Validates the settings without caching the connection.
pub fn run(connector: &Connector, settings: &RepositorySettings) -> Result<ValidateResult> {
    let connection = connector.validate(settings)?;
    let project = connection.project();

    Ok(ValidateResult {
        host: connection.host().to_string(),
        project: project.path_with_namespace.clone(),
        project_id: project.id,
        web_url: project.web_url.clone(),
        token_kind: connection.api().auth().kind(),
    })
}
