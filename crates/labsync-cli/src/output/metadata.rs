// SPDX-License-Identifier: Apache-2.0

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::{MembersResult, MilestonesResult};

use super::Renderable;

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn access_level_name(level: Option<u32>) -> &'static str {
    match level {
        Some(10) => "guest",
        Some(20) => "reporter",
        Some(30) => "developer",
        Some(40) => "maintainer",
        Some(50) => "owner",
        _ => "-",
    }
}

impl Renderable for MilestonesResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        if self.milestones.is_empty() {
            writeln!(w, "No milestones in {}.", style(&self.project).cyan())?;
            return Ok(());
        }

        let mut table = table(vec!["Title", "State", "Due"]);
        for milestone in &self.milestones {
            table.add_row(vec![
                milestone.title.clone(),
                milestone.state.clone().unwrap_or_else(|| "-".to_string()),
                milestone
                    .due_date
                    .map_or_else(|| "-".to_string(), |d| d.to_string()),
            ]);
        }
        writeln!(w, "{table}")
    }
}

impl Renderable for MembersResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        if self.members.is_empty() {
            writeln!(w, "No members in {}.", style(&self.project).cyan())?;
            return Ok(());
        }

        let mut table = table(vec!["Username", "Name", "Access"]);
        for member in &self.members {
            table.add_row(vec![
                member.username.clone(),
                member.name.clone(),
                access_level_name(member.access_level).to_string(),
            ]);
        }
        writeln!(w, "{table}")
    }
}
