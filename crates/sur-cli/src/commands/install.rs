//! Install command implementation.

use super::MatchArgs;
use crate::context::Context;
use crate::output;
use anyhow::Result;
use clap::Args;
use std::process::ExitCode;
use tracing::info;

/// Arguments for the install command.
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Sublet names or package files
    #[arg(required = true)]
    pub names: Vec<String>,

    #[command(flatten)]
    pub matching: MatchArgs,

    /// Reload sublets afterwards
    #[arg(short = 'R', long)]
    pub reload: bool,
}

/// Run the install command.
pub async fn run(ctx: &Context, args: &InstallArgs) -> Result<ExitCode> {
    info!(names = ?args.names, "running install command");

    let mut repo = ctx.repository()?;
    let report = repo
        .install(&args.names, &args.matching.options(), args.reload)
        .await?;
    output::report(&report);

    if output::has_failures(&report) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
