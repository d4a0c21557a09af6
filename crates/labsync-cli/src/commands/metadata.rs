// SPDX-License-Identifier: Apache-2.0

//! Milestones and members commands.

use std::sync::Arc;

use anyhow::Result;
use labsync_core::{Connection, Connector, RepositorySettings};

use super::types::{MembersResult, MilestonesResult};

fn connection(
    connector: &Connector,
    settings: &RepositorySettings,
    refresh: bool,
) -> Result<Arc<Connection>> {
    let connection = if refresh {
        connector.update_repository_configuration(settings)?
    } else {
        connector.connection(settings)?
    };
    Ok(connection)
}

/// Lists milestones.
pub fn milestones(
    connector: &Connector,
    settings: &RepositorySettings,
    refresh: bool,
) -> Result<MilestonesResult> {
    let connection = connection(connector, settings, refresh)?;
    Ok(MilestonesResult {
        project: connection.project().path_with_namespace.clone(),
        milestones: connection.metadata().milestones.clone(),
    })
}

/// Lists members.
pub fn members(
    connector: &Connector,
    settings: &RepositorySettings,
    refresh: bool,
) -> Result<MembersResult> {
    let connection = connection(connector, settings, refresh)?;
    Ok(MembersResult {
        project: connection.project().path_with_namespace.clone(),
        members: connection.metadata().members.clone(),
    })
}
