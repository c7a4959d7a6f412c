//! Upgrade command implementation.

use crate::context::Context;
use crate::output;
use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

/// Arguments for the upgrade command.
#[derive(Args, Debug)]
pub struct UpgradeArgs {
    /// Reload sublets afterwards
    #[arg(short = 'R', long)]
    pub reload: bool,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Run the upgrade command.
pub async fn run(ctx: &Context, args: &UpgradeArgs) -> Result<ExitCode> {
    let assume_yes = args.yes || ctx.assume_yes;
    let mut repo = ctx.repository()?;
    let report = repo.upgrade(args.reload, assume_yes).await?;

    if report.candidates.is_empty() {
        output::status("No upgrades found");
        return Ok(ExitCode::SUCCESS);
    }
    if !report.applied {
        output::status("Upgrade cancelled");
        return Ok(ExitCode::SUCCESS);
    }

    if assume_yes {
        for c in &report.candidates {
            output::status(&format!("{}: {} -> {}", c.name, c.from, c.to));
        }
    }
    output::report(&report.uninstalled);
    output::report(&report.installed);

    if output::has_failures(&report.uninstalled) || output::has_failures(&report.installed) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
