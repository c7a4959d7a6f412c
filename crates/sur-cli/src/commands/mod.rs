//! CLI commands for sur.

pub mod authoring;
pub mod catalog;
pub mod install;
pub mod remote;
pub mod reorder;
pub mod show;
pub mod uninstall;
pub mod upgrade;

use clap::{Args, Parser, Subcommand};
use sur_repository::{SearchOptions, Source};

/// sur - client for the sublet user repository
#[derive(Parser, Debug)]
#[command(name = "sur")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colors
    #[arg(short = 'c', long, global = true)]
    pub no_color: bool,

    /// Repository host
    #[arg(long, global = true, env = "SUR_HOST")]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mark a published sublet for review
    Annotate(remote::AnnotateArgs),

    /// Create a package archive from a definition file
    Build(authoring::BuildArgs),

    /// Show the config options of an installed sublet
    Config(show::ShowArgs),

    /// Download sublets into the current directory
    Fetch(remote::FetchArgs),

    /// Show the grabs of an installed sublet
    Grabs(show::ShowArgs),

    /// Show details of installed sublets
    Info(show::InfoArgs),

    /// Install sublets by name or package file
    Install(install::InstallArgs),

    /// List sublets
    List(catalog::ListArgs),

    /// Show the notes of an installed sublet
    Notes(show::ShowArgs),

    /// Search sublets
    Query(catalog::QueryArgs),

    /// Change the load order of installed sublets
    Reorder,

    /// Upload a package archive
    Submit(remote::SubmitArgs),

    /// Create a new sublet skeleton
    Template(authoring::TemplateArgs),

    /// Remove installed sublets
    Uninstall(uninstall::UninstallArgs),

    /// Download sublets and unpack them into the current directory
    Unpack(remote::FetchArgs),

    /// Rebuild a catalog
    Update(catalog::UpdateArgs),

    /// Replace installed sublets with newer versions
    Upgrade(upgrade::UpgradeArgs),
}

/// Which catalog to consult.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct SourceArgs {
    /// Use the installed sublets (default)
    #[arg(short, long, conflicts_with = "remote")]
    pub local: bool,

    /// Use the published sublets
    #[arg(short, long)]
    pub remote: bool,
}

impl SourceArgs {
    pub const fn source(self) -> Source {
        if self.remote {
            Source::Remote
        } else {
            Source::Local
        }
    }
}

/// How names are matched.
#[derive(Args, Debug, Clone, Default)]
pub struct MatchArgs {
    /// Only match this version
    #[arg(short = 'V', long = "version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Treat names as regular expressions
    #[arg(short = 'e', long)]
    pub regex: bool,

    /// Also match tags
    #[arg(short, long = "tag")]
    pub tags: bool,
}

impl MatchArgs {
    pub fn options(&self) -> SearchOptions {
        SearchOptions::new()
            .version(self.version.as_deref())
            .regex(self.regex)
            .tags(self.tags)
    }
}
