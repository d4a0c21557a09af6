// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use crate::cli::OutputContext;
use crate::commands::types::ValidateResult;

use super::Renderable;

impl Renderable for ValidateResult {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "{}", style("Repository settings are valid.").green().bold())?;
        writeln!(w, "  {}  {}", style("host:").dim(), self.host)?;
        writeln!(
            w,
            "  {}  {} (id {})",
            style("project:").dim(),
            style(&self.project).cyan(),
            self.project_id
        )?;
        if let Some(url) = &self.web_url {
            writeln!(w, "  {}  {}", style("web:").dim(), style(url).underlined())?;
        }
        writeln!(w, "  {}  {}", style("auth:").dim(), self.token_kind)?;
        Ok(())
    }
}
