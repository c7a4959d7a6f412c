//! Uninstall command implementation.

use super::MatchArgs;
use crate::context::Context;
use crate::output;
use anyhow::Result;
use clap::Args;
use std::process::ExitCode;
use tracing::info;

/// Arguments for the uninstall command.
#[derive(Args, Debug)]
pub struct UninstallArgs {
    /// Installed sublet names
    #[arg(required = true)]
    pub names: Vec<String>,

    #[command(flatten)]
    pub matching: MatchArgs,

    /// Reload sublets afterwards
    #[arg(short = 'R', long)]
    pub reload: bool,
}

/// Run the uninstall command.
pub async fn run(ctx: &Context, args: &UninstallArgs) -> Result<ExitCode> {
    info!(names = ?args.names, "running uninstall command");

    let mut repo = ctx.repository()?;
    let report = repo
        .uninstall(&args.names, &args.matching.options(), args.reload)
        .await?;
    output::report(&report);

    if output::has_failures(&report) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
