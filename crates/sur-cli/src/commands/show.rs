//! `info`, `config`, `grabs` and `notes`: views of installed sublets.

use crate::context::Context;
use crate::output::{self, Theme, views};
use anyhow::Result;
use clap::Args;
use std::process::ExitCode;
use sur_core::Specification;
use sur_repository::{Repository, effective_config, see_also};

/// Arguments for a single-sublet view.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Installed sublet name
    pub name: String,
}

/// Arguments for the info command.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Installed sublet names
    #[arg(required = true)]
    pub names: Vec<String>,
}

fn lookup(repo: &mut Repository, name: &str) -> Result<Option<Specification>> {
    let spec = repo.installed(name)?;
    if spec.is_none() {
        output::warning(&format!("Cannot find sublet `{name}' in local repository"));
    }
    Ok(spec)
}

/// Run the info command.
pub fn info(ctx: &Context, args: &InfoArgs) -> Result<ExitCode> {
    let mut repo = ctx.repository()?;
    let theme = Theme::from_env();
    let mut code = ExitCode::SUCCESS;

    for name in &args.names {
        match lookup(&mut repo, name)? {
            Some(spec) => {
                println!("{}", views::info(&spec, theme));
                println!("{}", views::see_also(&see_also(&spec)));
            }
            None => code = ExitCode::FAILURE,
        }
    }

    Ok(code)
}

/// Run the config command.
pub fn config(ctx: &Context, args: &ShowArgs) -> Result<ExitCode> {
    let mut repo = ctx.repository()?;
    let Some(spec) = lookup(&mut repo, &args.name)? else {
        return Ok(ExitCode::FAILURE);
    };

    println!();
    println!("{}", views::config(&effective_config(&spec), Theme::from_env()));
    println!();
    println!("{}", views::see_also(&see_also(&spec)));
    Ok(ExitCode::SUCCESS)
}

/// Run the grabs command.
pub fn grabs(ctx: &Context, args: &ShowArgs) -> Result<ExitCode> {
    let mut repo = ctx.repository()?;
    let Some(spec) = lookup(&mut repo, &args.name)? else {
        return Ok(ExitCode::FAILURE);
    };

    let table = views::grabs(&spec, Theme::from_env());
    if !table.is_empty() {
        println!();
        println!("{table}");
        println!();
    }
    println!("{}", views::see_also(&see_also(&spec)));
    Ok(ExitCode::SUCCESS)
}

/// Run the notes command.
pub fn notes(ctx: &Context, args: &ShowArgs) -> Result<ExitCode> {
    let mut repo = ctx.repository()?;
    let Some(spec) = lookup(&mut repo, &args.name)? else {
        return Ok(ExitCode::FAILURE);
    };

    if let Some(notes) = spec.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        println!();
        println!("{notes}");
        println!();
    }
    println!("{}", views::see_also(&see_also(&spec)));
    Ok(ExitCode::SUCCESS)
}
