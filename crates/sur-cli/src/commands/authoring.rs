//! `build` and `template`: commands for sublet authors.

use crate::context::Context;
use crate::output;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

/// Arguments for the build command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Definition file
    pub definition: PathBuf,
}

/// Arguments for the template command.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Sublet name
    pub name: String,
}

/// Run the build command.
pub fn build(ctx: &Context, args: &BuildArgs) -> Result<ExitCode> {
    let built = sur_archive::build(&args.definition, &ctx.working_dir)?;
    for line in &built.warnings {
        output::warning(line);
    }
    output::status(&format!(
        "Built sublet {} ({})",
        built.spec,
        built.path.display()
    ));
    Ok(ExitCode::SUCCESS)
}

/// Run the template command.
pub fn template(ctx: &Context, args: &TemplateArgs) -> Result<ExitCode> {
    let date = chrono::Utc::now().format("%a %b %d %H:%M:%S %Z %Y").to_string();
    let dir = sur_core::template::write_template(
        &ctx.working_dir,
        &args.name,
        ctx.config.user_name(),
        &date,
    )?;
    output::status(&format!("Created template in `{}'", dir.display()));
    Ok(ExitCode::SUCCESS)
}
