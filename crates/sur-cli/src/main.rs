//! sur - client for the sublet user repository.
//!
//! Installs, removes and upgrades sublets for the subtle window manager
//! and talks to the repository service for publishing.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod context;
mod environment;
mod output;
mod prompt;

use clap::Parser;
use commands::{Cli, Commands};
use context::{Context, ContextArgs};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 if cli.quiet => Level::ERROR,
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    output::init(cli.no_color, cli.quiet);

    let args = ContextArgs {
        host: cli.host.clone(),
        assume_yes: matches!(&cli.command, Commands::Upgrade(a) if a.yes),
        quiet: cli.quiet,
    };
    let ctx = match Context::new(&args) {
        Ok(ctx) => ctx,
        Err(e) => {
            output::error(&format!("Failed to initialize: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            output::error(&format!("Failed to start runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_command(&cli, &ctx)) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run_command(cli: &Cli, ctx: &Context) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Annotate(args) => commands::remote::annotate(ctx, args).await,
        Commands::Build(args) => commands::authoring::build(ctx, args),
        Commands::Config(args) => commands::show::config(ctx, args),
        Commands::Fetch(args) => commands::remote::fetch(ctx, args).await,
        Commands::Grabs(args) => commands::show::grabs(ctx, args),
        Commands::Info(args) => commands::show::info(ctx, args),
        Commands::Install(args) => commands::install::run(ctx, args).await,
        Commands::List(args) => commands::catalog::list(ctx, args).await,
        Commands::Notes(args) => commands::show::notes(ctx, args),
        Commands::Query(args) => commands::catalog::query(ctx, args).await,
        Commands::Reorder => commands::reorder::run(ctx),
        Commands::Submit(args) => commands::remote::submit(ctx, args).await,
        Commands::Template(args) => commands::authoring::template(ctx, args),
        Commands::Uninstall(args) => commands::uninstall::run(ctx, args).await,
        Commands::Unpack(args) => commands::remote::unpack(ctx, args).await,
        Commands::Update(args) => commands::catalog::update(ctx, args).await,
        Commands::Upgrade(args) => commands::upgrade::run(ctx, args).await,
    }
}
