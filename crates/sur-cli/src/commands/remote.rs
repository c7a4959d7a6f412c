//! `fetch`, `unpack`, `submit` and `annotate`: commands that talk to the
//! repository service.

use super::MatchArgs;
use crate::context::Context;
use crate::output;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

/// Arguments for the fetch and unpack commands.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Sublet names
    #[arg(required = true)]
    pub names: Vec<String>,

    #[command(flatten)]
    pub matching: MatchArgs,
}

/// Arguments for the submit command.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Package archive
    pub file: PathBuf,
}

/// Arguments for the annotate command.
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Sublet name
    pub name: String,

    /// Annotate this version
    #[arg(short = 'V', long = "version", value_name = "VERSION")]
    pub version: Option<String>,
}

/// Run the fetch command.
pub async fn fetch(ctx: &Context, args: &FetchArgs) -> Result<ExitCode> {
    let mut repo = ctx.repository()?;
    let report = repo
        .fetch(&args.names, &args.matching.options(), &ctx.working_dir)
        .await?;
    output::report(&report);

    if output::has_failures(&report) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Run the unpack command.
pub async fn unpack(ctx: &Context, args: &FetchArgs) -> Result<ExitCode> {
    let mut repo = ctx.repository()?;
    let report = repo
        .unpack(&args.names, &args.matching.options(), &ctx.working_dir)
        .await?;
    output::report(&report);

    if output::has_failures(&report) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Run the submit command.
pub async fn submit(ctx: &Context, args: &SubmitArgs) -> Result<ExitCode> {
    let mut repo = ctx.repository()?;
    let spec = repo.submit(&args.file).await?;
    output::status(&format!("Submitted sublet {spec}"));
    Ok(ExitCode::SUCCESS)
}

/// Run the annotate command.
pub async fn annotate(ctx: &Context, args: &AnnotateArgs) -> Result<ExitCode> {
    let mut repo = ctx.repository()?;
    let spec = repo.annotate(&args.name, args.version.as_deref()).await?;
    output::status(&format!("Marked sublet {spec} for review"));
    Ok(ExitCode::SUCCESS)
}
