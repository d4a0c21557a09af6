// SPDX-License-Identifier: Apache-2.0

//! Issue, note and upload operations.

use std::path::Path;

use tracing::{debug, instrument};

use super::{GitlabApi, build_url};
use crate::models::{Issue, Note, Project, StateEvent, Upload};
use crate::pagination::Paginator;
use crate::transport::{Request, TransportError};

impl GitlabApi {
    /// Returns a lazy paginator over the issues of a project.
    pub fn issue_pages(&self, project: &Project) -> Result<Paginator<'_, Issue>, TransportError> {
        self.paginate(&format!("/projects/{}/issues", project.id))
    }

    /// Lists the notes of an issue.
    #[instrument(skip(self, issue), fields(project_id = issue.project_id, iid = issue.iid))]
    pub fn notes(&self, issue: &Issue) -> Result<Vec<Note>, TransportError> {
        self.paginate(&format!(
            "/projects/{}/issues/{}/notes",
            issue.project_id, issue.iid
        ))?
        .collect_all()
    }

    /// Closes or reopens an issue.
    #[instrument(skip(self, project), fields(project_id = project.id))]
    pub fn set_issue_state(
        &self,
        project: &Project,
        iid: u64,
        event: StateEvent,
    ) -> Result<Issue, TransportError> {
        let url = self.api_url(&format!("/projects/{}/issues/{iid}", project.id))?;
        let request = Request::put(url).with("state_event", event.as_str());
        self.execute(&request)
    }

    /// Uploads a file to a project.
    #[instrument(skip(self, project), fields(project_id = project.id))]
    pub fn upload_file(&self, project: &Project, path: &Path) -> Result<Upload, TransportError> {
        let url = self.api_url(&format!("/projects/{}/uploads", project.id))?;
        let request = Request::post(url).with_attachment("file", path);
        let upload: Upload = self.execute(&request)?;
        debug!(url = %upload.url, "Uploaded file");
        Ok(upload)
    }

    /// Downloads the raw bytes of a previous upload.
    #[instrument(skip(self, project, upload), fields(url = %upload.url))]
    pub fn download_upload(&self, project: &Project, upload: &Upload) -> Result<Vec<u8>, TransportError> {
        let url = build_url(
            &self.host,
            &format!("/{}{}", project.path_with_namespace, upload.url),
        )?;
        self.transport.execute_bytes(&Request::get(url), Some(&self.auth))
    }
}
