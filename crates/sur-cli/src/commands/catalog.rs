//! `list`, `query` and `update`.

use super::{MatchArgs, SourceArgs};
use crate::context::Context;
use crate::output::{self, Theme};
use anyhow::Result;
use clap::Args;
use std::process::ExitCode;
use sur_core::Error;
use tracing::info;

/// Arguments for the list command.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the query command.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Name, pattern or tag
    pub query: String,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub matching: MatchArgs,
}

/// Arguments for the update command.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Run the list command.
pub async fn list(ctx: &Context, args: &ListArgs) -> Result<ExitCode> {
    let source = args.source.source();
    info!(%source, "listing sublets");

    let mut repo = ctx.repository()?;
    let rows = repo.list(source).await?;
    print!("{}", output::views::listing(&rows, Theme::from_env()));
    Ok(ExitCode::SUCCESS)
}

/// Run the query command.
pub async fn query(ctx: &Context, args: &QueryArgs) -> Result<ExitCode> {
    let source = args.source.source();
    info!(query = %args.query, %source, "querying sublets");

    let mut repo = ctx.repository()?;
    match repo
        .query(&args.query, source, &args.matching.options())
        .await
    {
        Ok(rows) => {
            print!("{}", output::views::listing(&rows, Theme::from_env()));
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::NotFound { name }) => {
            output::warning(&format!("Cannot find `{name}' in {source} repository"));
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Run the update command.
pub async fn update(ctx: &Context, args: &UpdateArgs) -> Result<ExitCode> {
    let source = args.source.source();
    let mut repo = ctx.repository()?;
    let entries = repo.update(source).await?;
    output::status(&format!("Updated {source} cache ({entries} sublets)"));
    Ok(ExitCode::SUCCESS)
}
