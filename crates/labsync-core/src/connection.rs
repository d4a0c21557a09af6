// SPDX-License-Identifier: Apache-2.0

//! Authenticated connection to one project, with cached project metadata.

use std::sync::{Arc, PoisonError, RwLock};

use secrecy::SecretString;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::gitlab::GitlabApi;
use crate::models::{Member, Milestone, Project};
use crate::transport::TransportError;

/// Milestones and members of a project, replaced as a unit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectMetadata {
    /// Project milestones.
    pub milestones: Vec<Milestone>,
    /// Direct project members followed by members of the owning group.
    pub members: Vec<Member>,
}

impl ProjectMetadata {
    /// Finds a milestone by exact title.
    #[must_use]
    pub fn find_milestone(&self, title: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.title == title)
    }

    /// Finds a member by username or display name.
    #[must_use]
    pub fn find_member(&self, name: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| m.username == name || m.name == name)
    }
}

/// A validated session bound to one project.
#[derive(Debug)]
pub struct Connection {
    host: String,
    project: Project,
    api: GitlabApi,
    metadata: RwLock<Arc<ProjectMetadata>>,
}

impl Connection {
    pub(crate) fn new(host: String, project: Project, api: GitlabApi) -> Self {
        Self {
            host,
            project,
            api,
            metadata: RwLock::new(Arc::new(ProjectMetadata::default())),
        }
    }

    /// Host the session talks to.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The validated project.
    #[must_use]
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Session token.
    #[must_use]
    pub fn token(&self) -> &SecretString {
        self.api.auth().token()
    }

    /// Authenticated API client.
    #[must_use]
    pub fn api(&self) -> &GitlabApi {
        &self.api
    }

    /// Current metadata snapshot.
    #[must_use]
    pub fn metadata(&self) -> Arc<ProjectMetadata> {
        Arc::clone(&self.metadata.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Reloads milestones and members.
    ///
    /// A failure fetching milestones or project members leaves the previous
    /// snapshot untouched. Group members are best effort: a failure there is
    /// logged and the direct members are kept.
    #[instrument(skip(self), fields(project = %self.project.path_with_namespace))]
    pub fn update(&self) -> Result<(), TransportError> {
        let milestones = self.api.milestones(&self.project)?;
        let mut members = self.api.project_members(&self.project)?;

        match self.api.namespace_members(&self.project.namespace) {
            Ok(group_members) => members.extend(group_members),
            Err(e) => warn!(
                namespace = %self.project.namespace.path,
                error = %e,
                "Could not fetch namespace members"
            ),
        }

        debug!(
            milestones = milestones.len(),
            members = members.len(),
            "Project metadata refreshed"
        );
        let snapshot = Arc::new(ProjectMetadata {
            milestones,
            members,
        });
        *self
            .metadata
            .write()
            .unwrap_or_else(PoisonError::into_inner) = snapshot;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(username: &str, name: &str) -> Member {
        Member {
            id: 1,
            username: username.to_string(),
            name: name.to_string(),
            state: None,
            access_level: Some(30),
        }
    }

    #[test]
    fn test_find_member_by_username_or_name() {
        let metadata = ProjectMetadata {
            milestones: vec![],
            members: vec![member("alice", "Alice Liddell"), member("bob", "Bob Ross")],
        };
        assert_eq!(metadata.find_member("bob").unwrap().name, "Bob Ross");
        assert_eq!(metadata.find_member("Alice Liddell").unwrap().username, "alice");
        assert!(metadata.find_member("carol").is_none());
    }

    #[test]
    fn test_find_milestone_exact_title() {
        let metadata = ProjectMetadata {
            milestones: vec![Milestone {
                id: 1,
                iid: 1,
                title: "v1.0".to_string(),
                description: None,
                state: Some("active".to_string()),
                due_date: None,
            }],
            members: vec![],
        };
        assert!(metadata.find_milestone("v1.0").is_some());
        assert!(metadata.find_milestone("V1.0").is_none());
    }
}
