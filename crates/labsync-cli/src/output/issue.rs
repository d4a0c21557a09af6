// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::{IssueStateResult, UploadResult};

use super::Renderable;

impl Renderable for IssueStateResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(
            w,
            "{} {}#{} is now {}",
            style("Done:").green().bold(),
            self.project,
            self.issue.iid,
            style(self.issue.state).bold()
        )
    }
}

impl Renderable for UploadResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "{}", style("File uploaded.").green().bold())?;
        writeln!(w, "  {}  {}", style("url:").dim(), self.upload.url)?;
        writeln!(w, "  {}  {}", style("markdown:").dim(), self.upload.markdown)
    }
}
