// SPDX-License-Identifier: Apache-2.0

use console::style;
use labsync_core::{Issue, IssueState};
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::IssuesResult;

use super::Renderable;

fn state_label(issue: &Issue) -> String {
    match issue.state {
        IssueState::Opened => style("open").green().to_string(),
        IssueState::Closed => style("closed").red().to_string(),
        IssueState::Other => style("other").dim().to_string(),
    }
}

impl Renderable for IssuesResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        for warning in &self.warnings {
            writeln!(w, "{} {warning}", style("warning:").yellow())?;
        }

        if self.issues.is_empty() {
            writeln!(w, "No matching issues in {}.", style(&self.project).cyan())?;
            return Ok(());
        }

        writeln!(
            w,
            "{} ({} matching)",
            style(&self.project).cyan().bold(),
            self.total_count
        )?;
        writeln!(w)?;

        for record in &self.issues {
            let issue = &record.issue;
            let assignee = issue
                .assignee
                .as_ref()
                .map_or_else(|| "-".to_string(), |a| format!("@{}", a.username));
            writeln!(
                w,
                "  {} {} {} {}",
                style(format!("#{:<5}", issue.iid)).dim(),
                state_label(issue),
                style(&issue.title).bold(),
                style(assignee).dim()
            )?;

            let mut details = Vec::new();
            if !issue.labels.is_empty() {
                details.push(format!("labels: {}", issue.labels.join(", ")));
            }
            if let Some(milestone) = &issue.milestone {
                details.push(format!("milestone: {}", milestone.title));
            }
            if let Some(updated) = issue.updated_at {
                details.push(format!("updated {}", updated.format("%Y-%m-%d")));
            }
            if !details.is_empty() {
                writeln!(w, "         {}", style(details.join("  ")).dim())?;
            }

            if ctx.verbose
                && let Some(description) = issue.description.as_deref().filter(|d| !d.is_empty())
            {
                for line in description.lines().take(5) {
                    writeln!(w, "         {line}")?;
                }
            }

            for note in &record.notes {
                let first_line = note.body.lines().next().unwrap_or_default();
                writeln!(
                    w,
                    "         {} {}",
                    style(format!("@{}:", note.author.username)).cyan(),
                    first_line
                )?;
            }
        }
        Ok(())
    }
}
