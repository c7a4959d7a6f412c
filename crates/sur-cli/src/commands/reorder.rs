//! Reorder command implementation.

use crate::context::Context;
use crate::output;
use anyhow::Result;
use std::process::ExitCode;

/// Run the reorder command.
pub fn run(ctx: &Context) -> Result<ExitCode> {
    let mut repo = ctx.repository()?;
    let renamed = repo.reorder()?;

    if renamed.is_empty() {
        output::status("Nothing reordered");
    }
    for entry in &renamed {
        let name = |p: &std::path::Path| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        output::status(&format!("Moved `{}' to `{}'", name(&entry.from), name(&entry.to)));
    }

    Ok(ExitCode::SUCCESS)
}
