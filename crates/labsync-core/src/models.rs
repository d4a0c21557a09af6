// SPDX-License-Identifier: Apache-2.0

//! GitLab API v4 resources.
//!
//! Only the fields labsync reads are modelled; unknown fields are ignored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Namespace (user or group) owning a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Namespace ID.
    pub id: u64,
    /// URL path of the namespace.
    pub path: String,
    /// `user` or `group`.
    #[serde(default)]
    pub kind: Option<String>,
}

/// A project visible to the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Full path, e.g. `group/subgroup/project`.
    pub path_with_namespace: String,
    /// Owning namespace.
    pub namespace: Namespace,
    /// Web URL of the project.
    #[serde(default)]
    pub web_url: Option<String>,
}

/// Project milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Global ID.
    pub id: u64,
    /// Project-scoped ID.
    #[serde(default)]
    pub iid: u64,
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// `active` or `closed`.
    #[serde(default)]
    pub state: Option<String>,
    /// Due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// A user as embedded in issues and notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Project or group member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// User ID.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Account state.
    #[serde(default)]
    pub state: Option<String>,
    /// Access level (10 guest .. 50 owner).
    #[serde(default)]
    pub access_level: Option<u32>,
}

/// Issue state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// Open issue.
    Opened,
    /// Closed issue.
    Closed,
    /// Any other state reported by the server.
    #[serde(other)]
    Other,
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueState::Opened => write!(f, "opened"),
            IssueState::Closed => write!(f, "closed"),
            IssueState::Other => write!(f, "other"),
        }
    }
}

/// Project issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Global ID.
    pub id: u64,
    /// Project-scoped ID.
    pub iid: u64,
    /// Owning project.
    #[serde(default)]
    pub project_id: u64,
    /// Title.
    pub title: String,
    /// Description in Markdown.
    #[serde(default)]
    pub description: Option<String>,
    /// State.
    pub state: IssueState,
    /// Assignee.
    #[serde(default)]
    pub assignee: Option<User>,
    /// Milestone.
    #[serde(default)]
    pub milestone: Option<Milestone>,
    /// Label names.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Issue comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Note ID.
    pub id: u64,
    /// Body in Markdown.
    pub body: String,
    /// Author.
    pub author: User,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Result of a file upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upload {
    /// Alternative text.
    pub alt: String,
    /// Project-relative URL.
    pub url: String,
    /// Markdown snippet referencing the upload.
    pub markdown: String,
}

/// Issue state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// Close the issue.
    Close,
    /// Reopen the issue.
    Reopen,
}

impl StateEvent {
    /// Wire value of the `state_event` field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StateEvent::Close => "close",
            StateEvent::Reopen => "reopen",
        }
    }
}
