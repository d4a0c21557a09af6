// SPDX-License-Identifier: Apache-2.0

//! Result types returned by command handlers.
//!
//! Command handlers return data instead of printing directly; rendering
//! lives in `output`.

use labsync_core::{Issue, IssueRecord, Member, Milestone, QuerySummary, TokenKind, Upload};
use serde::Serialize;

/// Result from the validate command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ValidateResult {
    /// Host the session talks to.
    pub host: String,
    /// Project path.
    pub project: String,
    /// Project ID.
    pub project_id: u64,
    /// Project web URL, if reported.
    pub web_url: Option<String>,
    /// Kind of token the session uses.
    pub token_kind: TokenKind,
}

/// Result from the issues command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct IssuesResult {
    /// Project path.
    pub project: String,
    /// Query that was applied.
    pub query: QuerySummary,
    /// Matching issues in server order.
    pub issues: Vec<IssueRecord>,
    /// Number of matching issues.
    pub total_count: usize,
    /// Filter values that match nothing in the project metadata.
    pub warnings: Vec<String>,
}

/// Result from the milestones command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MilestonesResult {
    /// Project path.
    pub project: String,
    /// Milestones.
    pub milestones: Vec<Milestone>,
}

/// Result from the members command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MembersResult {
    /// Project path.
    pub project: String,
    /// Project members followed by group members.
    pub members: Vec<Member>,
}

/// Result from the issue close/reopen commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct IssueStateResult {
    /// Project path.
    pub project: String,
    /// Issue after the change.
    pub issue: Issue,
}

/// Result from the upload command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UploadResult {
    /// Project path.
    pub project: String,
    /// Upload reference.
    pub upload: Upload,
}
