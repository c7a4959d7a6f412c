//! State shared by all commands.

use crate::environment::SystemEnvironment;
use crate::prompt::TerminalPrompt;
use std::path::PathBuf;
use sur_config::SurConfig;
use sur_downloader::{BarProgress, NoProgress, ProgressSink};
use sur_repository::Repository;

/// Global CLI context shared across all commands
#[derive(Debug, Clone)]
pub struct Context {
    /// Resolved configuration
    pub config: SurConfig,
    /// Directory that fetched and unpacked sublets land in
    pub working_dir: PathBuf,
    /// Answer prompts with yes
    pub assume_yes: bool,
    /// Suppress progress output
    pub quiet: bool,
}

/// Arguments the context is built from
#[derive(Debug, Clone, Default)]
pub struct ContextArgs {
    pub host: Option<String>,
    pub assume_yes: bool,
    pub quiet: bool,
}

impl Context {
    /// Create a new context from CLI arguments
    pub fn new(args: &ContextArgs) -> anyhow::Result<Self> {
        let mut config = SurConfig::from_env()?;
        if let Some(host) = &args.host {
            config = config.with_host(host)?;
        }

        Ok(Self {
            config,
            working_dir: std::env::current_dir()?,
            assume_yes: args.assume_yes,
            quiet: args.quiet,
        })
    }

    /// Open the repository with terminal progress and prompts.
    pub fn repository(&self) -> anyhow::Result<Repository> {
        let progress: Box<dyn ProgressSink> = if self.quiet {
            Box::new(NoProgress)
        } else {
            Box::new(BarProgress::new())
        };

        Ok(
            Repository::new(self.config.clone(), Box::new(SystemEnvironment::new()))?
                .with_progress(progress)
                .with_prompt(Box::new(TerminalPrompt {
                    assume_yes: self.assume_yes,
                })),
        )
    }
}
