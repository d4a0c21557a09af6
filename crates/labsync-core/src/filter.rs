// SPDX-License-Identifier: Apache-2.0

//! Client-side issue filtering.

use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;

use crate::error::LabsyncError;
use crate::models::{Issue, IssueState};

/// Criteria an issue must satisfy to be returned by a query.
///
/// Empty `assignee` or `milestone` match anything. Label patterns are
/// regular expressions matched against each label name.
#[derive(Debug, Clone)]
pub struct IssueQuery {
    assignee: String,
    milestone: String,
    opened: bool,
    closed: bool,
    labels: Vec<Regex>,
}

impl IssueQuery {
    /// Builds a query.
    ///
    /// # Errors
    ///
    /// Returns `LabsyncError::InvalidQuery` if a label pattern is not a
    /// valid regular expression.
    pub fn new<S: AsRef<str>>(
        assignee: impl Into<String>,
        milestone: impl Into<String>,
        opened: bool,
        closed: bool,
        label_patterns: &[S],
    ) -> Result<Self, LabsyncError> {
        let labels = label_patterns
            .iter()
            .map(|p| p.as_ref())
            .map(|p| {
                Regex::new(p).map_err(|e| LabsyncError::InvalidQuery {
                    message: format!("invalid label pattern '{p}': {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            assignee: assignee.into(),
            milestone: milestone.into(),
            opened,
            closed,
            labels,
        })
    }

    /// Builds a query from string attributes.
    ///
    /// Recognized keys are `assignee`, `milestone`, `labels` (comma
    /// separated; entries are trimmed and blank ones skipped), `opened` and
    /// `closed` (`"true"` in any case).
    pub fn from_attributes(attributes: &HashMap<String, String>) -> Result<Self, LabsyncError> {
        let get = |key: &str| attributes.get(key).map(String::as_str).unwrap_or_default();
        let flag = |key: &str| get(key).trim().eq_ignore_ascii_case("true");
        let labels: Vec<&str> = get("labels")
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        Self::new(
            get("assignee"),
            get("milestone"),
            flag("opened"),
            flag("closed"),
            &labels,
        )
    }

    /// Accepts open and closed issues with no further constraint.
    #[must_use]
    pub fn all() -> Self {
        Self {
            assignee: String::new(),
            milestone: String::new(),
            opened: true,
            closed: true,
            labels: Vec::new(),
        }
    }

    /// Assignee constraint (username or display name).
    #[must_use]
    pub fn assignee(&self) -> &str {
        &self.assignee
    }

    /// Milestone title constraint.
    #[must_use]
    pub fn milestone(&self) -> &str {
        &self.milestone
    }

    /// Whether open issues are accepted.
    #[must_use]
    pub fn opened(&self) -> bool {
        self.opened
    }

    /// Whether closed issues are accepted.
    #[must_use]
    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Label patterns.
    #[must_use]
    pub fn label_patterns(&self) -> Vec<&str> {
        self.labels.iter().map(Regex::as_str).collect()
    }

    /// True if the issue satisfies every criterion.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        self.matches_assignee(issue)
            && self.matches_milestone(issue)
            && self.matches_labels(issue)
            && self.matches_state(issue)
    }

    fn matches_assignee(&self, issue: &Issue) -> bool {
        self.assignee.is_empty()
            || issue
                .assignee
                .as_ref()
                .is_some_and(|a| a.username == self.assignee || a.name == self.assignee)
    }

    fn matches_milestone(&self, issue: &Issue) -> bool {
        self.milestone.is_empty()
            || issue
                .milestone
                .as_ref()
                .is_some_and(|m| m.title == self.milestone)
    }

    // Counts (pattern, label) hits; one label may satisfy several patterns.
    fn matches_labels(&self, issue: &Issue) -> bool {
        let hits: usize = self
            .labels
            .iter()
            .map(|pattern| issue.labels.iter().filter(|l| pattern.is_match(l)).count())
            .sum();
        hits >= self.labels.len()
    }

    fn matches_state(&self, issue: &Issue) -> bool {
        match issue.state {
            IssueState::Closed => self.closed,
            IssueState::Opened => self.opened,
            IssueState::Other => true,
        }
    }
}

impl Default for IssueQuery {
    fn default() -> Self {
        Self::all()
    }
}

/// Serializable summary of a query, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct QuerySummary {
    /// Assignee constraint.
    pub assignee: String,
    /// Milestone constraint.
    pub milestone: String,
    /// Open issues accepted.
    pub opened: bool,
    /// Closed issues accepted.
    pub closed: bool,
    /// Label patterns.
    pub labels: Vec<String>,
}

impl From<&IssueQuery> for QuerySummary {
    fn from(query: &IssueQuery) -> Self {
        Self {
            assignee: query.assignee.clone(),
            milestone: query.milestone.clone(),
            opened: query.opened,
            closed: query.closed,
            labels: query.label_patterns().into_iter().map(str::to_string).collect(),
        }
    }
}
