// SPDX-License-Identifier: Apache-2.0

//! Session validation.
//!
//! Turns [`RepositorySettings`] into an authenticated [`Connection`]:
//! the repository URL is split into host and project path, credentials are
//! checked (private token) or exchanged for a session token (password), and
//! the project is located among those visible to the user.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, info, instrument};

use crate::config::RepositorySettings;
use crate::connection::Connection;
use crate::error::LabsyncError;
use crate::gitlab::GitlabApi;
use crate::gitlab::auth::request_session_token;
use crate::transport::{AuthContext, TokenKind, Transport, TransportError};

static PROJECT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:http|https)://(?:[^/]*))/((?:.*?)/(?:[^/]*?))$")
        .expect("valid project URL regex")
});

/// Host and project path extracted from a repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocation {
    /// Scheme and authority, plus any path prefix from the base URL.
    pub host: String,
    /// Project path, e.g. `group/subgroup/project`.
    pub project_path: String,
}

/// Splits a repository URL into host and project path.
///
/// With a non-blank `base_url` the URL must start with it and the remainder
/// (minus one leading `/`) is the project path. Otherwise the host is the
/// scheme and authority and the path is everything after it. A trailing
/// `.git` is removed from the project path.
///
/// # Errors
///
/// Returns `LabsyncError::InvalidProjectUrl` when the URL does not fit.
pub fn resolve_project_location(
    repository_url: &str,
    base_url: Option<&str>,
) -> Result<ProjectLocation, LabsyncError> {
    let invalid = || LabsyncError::InvalidProjectUrl {
        url: repository_url.to_string(),
    };

    let (host, path) = match base_url.map(str::trim).filter(|b| !b.is_empty()) {
        Some(base) => {
            let rest = repository_url.strip_prefix(base).ok_or_else(invalid)?;
            (base.to_string(), rest.strip_prefix('/').unwrap_or(rest))
        }
        None => {
            let caps = PROJECT_URL.captures(repository_url).ok_or_else(invalid)?;
            let host = caps.get(1).ok_or_else(invalid)?.as_str();
            let path = caps.get(2).ok_or_else(invalid)?.as_str();
            (host.to_string(), path)
        }
    };

    Ok(ProjectLocation {
        host,
        project_path: path.strip_suffix(".git").unwrap_or(path).to_string(),
    })
}

/// Validates repository settings against the server.
#[derive(Debug, Clone)]
pub struct SessionValidator {
    transport: Arc<Transport>,
}

impl SessionValidator {
    /// Creates a validator using a shared transport.
    #[must_use]
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// The shared transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    /// Opens an authenticated connection to the configured project.
    ///
    /// The returned connection has no metadata loaded yet.
    #[instrument(skip(self, settings), fields(url = %settings.url, private_token = settings.use_private_token))]
    pub fn validate(&self, settings: &RepositorySettings) -> Result<Connection, LabsyncError> {
        let location = resolve_project_location(&settings.url, settings.base_url.as_deref())?;
        debug!(host = %location.host, project = %location.project_path, "Resolved project URL");

        let auth = self
            .authenticate(&location.host, settings)?
            .with_method(settings.auth_method);
        let api = GitlabApi::new(Arc::clone(&self.transport), location.host.clone(), auth);

        let projects = api.projects()?;
        debug!(count = projects.len(), "Fetched visible projects");

        let project = projects
            .into_iter()
            .find(|p| p.path_with_namespace == location.project_path)
            .ok_or_else(|| LabsyncError::UnknownProject {
                path: location.project_path.clone(),
            })?;

        info!(project = %project.path_with_namespace, id = project.id, "Session validated");
        Ok(Connection::new(location.host, project, api))
    }

    fn authenticate(
        &self,
        host: &str,
        settings: &RepositorySettings,
    ) -> Result<AuthContext, TransportError> {
        if settings.use_private_token {
            let auth = AuthContext::new(settings.password.clone(), TokenKind::PrivateToken)
                .with_method(settings.auth_method);
            GitlabApi::new(Arc::clone(&self.transport), host, auth.clone()).current_user()?;
            return Ok(auth);
        }

        let token =
            request_session_token(&self.transport, host, &settings.username, &settings.password)?;
        Ok(AuthContext::new(token, TokenKind::AccessToken))
    }
}
