// SPDX-License-Identifier: Apache-2.0

//! Projects, milestones and members.

use tracing::instrument;

use super::GitlabApi;
use crate::models::{Member, Milestone, Namespace, Project};
use crate::transport::TransportError;

impl GitlabApi {
    /// Lists every project visible to the credentials.
    #[instrument(skip(self), fields(host = %self.host))]
    pub fn projects(&self) -> Result<Vec<Project>, TransportError> {
        self.paginate("/projects")?.collect_all()
    }

    /// Lists the milestones of a project.
    #[instrument(skip(self, project), fields(project_id = project.id))]
    pub fn milestones(&self, project: &Project) -> Result<Vec<Milestone>, TransportError> {
        self.paginate(&format!("/projects/{}/milestones", project.id))?
            .collect_all()
    }

    /// Lists the direct members of a project.
    #[instrument(skip(self, project), fields(project_id = project.id))]
    pub fn project_members(&self, project: &Project) -> Result<Vec<Member>, TransportError> {
        self.paginate(&format!("/projects/{}/members", project.id))?
            .collect_all()
    }

    /// Lists the members of the group owning a project.
    #[instrument(skip(self, namespace), fields(namespace = %namespace.path))]
    pub fn namespace_members(&self, namespace: &Namespace) -> Result<Vec<Member>, TransportError> {
        self.paginate(&format!("/groups/{}/members", namespace.id))?
            .collect_all()
    }
}
