// SPDX-License-Identifier: Apache-2.0

//! Platform-agnostic entry point.
//!
//! [`Connector`] owns the connection cache and exposes the operations a
//! frontend needs: validating settings, streaming filtered issues,
//! refreshing project metadata and mutating issues. Callers create and own
//! their connector; nothing here is global.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::cache::ConnectionCache;
use crate::config::{HttpConfig, RepositorySettings};
use crate::connection::Connection;
use crate::error::LabsyncError;
use crate::filter::IssueQuery;
use crate::models::{Issue, Member, Milestone, Note, StateEvent, Upload};
use crate::session::SessionValidator;
use crate::transport::Transport;

/// An accepted issue, with its notes when requested.
#[derive(Debug, Clone, Serialize)]
pub struct IssueRecord {
    /// The issue.
    pub issue: Issue,
    /// Notes, empty unless requested.
    pub notes: Vec<Note>,
}

/// Entry point for frontends.
#[derive(Debug)]
pub struct Connector {
    cache: ConnectionCache,
}

impl Connector {
    /// Creates a connector with its own transport and empty cache.
    pub fn new(http: &HttpConfig) -> Result<Self, LabsyncError> {
        let transport = Arc::new(Transport::new(http)?);
        Ok(Self::with_cache(ConnectionCache::new(SessionValidator::new(
            transport,
        ))))
    }

    /// Creates a connector around an existing cache.
    #[must_use]
    pub fn with_cache(cache: ConnectionCache) -> Self {
        Self { cache }
    }

    /// The connection cache.
    #[must_use]
    pub fn cache(&self) -> &ConnectionCache {
        &self.cache
    }

    /// Validates settings without touching the cache.
    pub fn validate(&self, settings: &RepositorySettings) -> Result<Connection, LabsyncError> {
        self.cache.validator().validate(settings)
    }

    /// Returns the cached connection, validating on a miss.
    pub fn connection(&self, settings: &RepositorySettings) -> Result<Arc<Connection>, LabsyncError> {
        self.cache.get(settings, false)
    }

    /// Streams every issue accepted by `query` to `collector`.
    ///
    /// Pages are fetched lazily and issues are delivered in server order.
    /// Returns the number of accepted issues.
    #[instrument(skip(self, settings, query, collector), fields(url = %settings.url))]
    pub fn perform_query<F>(
        &self,
        settings: &RepositorySettings,
        query: &IssueQuery,
        include_notes: bool,
        mut collector: F,
    ) -> Result<usize, LabsyncError>
    where
        F: FnMut(IssueRecord),
    {
        let connection = self.cache.get(settings, false)?;
        let api = connection.api();
        let mut pages = api.issue_pages(connection.project())?;

        let mut accepted = 0;
        let mut seen = 0;
        while let Some(page) = pages.fetch_next()? {
            seen += page.len();
            for issue in page {
                if !query.matches(&issue) {
                    continue;
                }
                let notes = if include_notes {
                    api.notes(&issue)?
                } else {
                    Vec::new()
                };
                collector(IssueRecord { issue, notes });
                accepted += 1;
            }
        }

        info!(seen, accepted, pages = pages.pages_fetched(), "Issue query complete");
        Ok(accepted)
    }

    /// Rebuilds the connection and reloads milestones and members.
    pub fn update_repository_configuration(
        &self,
        settings: &RepositorySettings,
    ) -> Result<Arc<Connection>, LabsyncError> {
        self.cache.get(settings, true)
    }

    /// Cached milestones, or an empty list if the repository is unreachable.
    #[must_use]
    pub fn milestones(&self, settings: &RepositorySettings) -> Vec<Milestone> {
        self.cache
            .get_safe(settings)
            .map(|c| c.metadata().milestones.clone())
            .unwrap_or_default()
    }

    /// Cached members, or an empty list if the repository is unreachable.
    #[must_use]
    pub fn members(&self, settings: &RepositorySettings) -> Vec<Member> {
        self.cache
            .get_safe(settings)
            .map(|c| c.metadata().members.clone())
            .unwrap_or_default()
    }

    /// Closes or reopens an issue.
    pub fn set_issue_state(
        &self,
        settings: &RepositorySettings,
        iid: u64,
        event: StateEvent,
    ) -> Result<Issue, LabsyncError> {
        let connection = self.cache.get(settings, false)?;
        let issue = connection
            .api()
            .set_issue_state(connection.project(), iid, event)?;
        debug!(iid, state = %issue.state, "Issue state changed");
        Ok(issue)
    }

    /// Uploads a file to the project.
    pub fn upload_attachment(
        &self,
        settings: &RepositorySettings,
        path: &Path,
    ) -> Result<Upload, LabsyncError> {
        let connection = self.cache.get(settings, false)?;
        Ok(connection.api().upload_file(connection.project(), path)?)
    }
}
