//! The host runtime as seen from the command line.
//!
//! The host version comes from `subtle --version`. Library dependencies
//! are probed with `gem list -i`; if that fails, a plain `require` through
//! `ruby` proves the library is loadable but not which version it is.
//! Sublets are reloaded with `subtler -r`.

use std::process::{Command, Stdio};
use std::sync::OnceLock;
use sur_core::{DependencyStatus, Environment, Error, Result};
use tracing::debug;

/// Executable of the host.
const HOST: &str = "subtle";
/// Remote control of the running host.
const CONTROL: &str = "subtler";

/// [`Environment`] backed by external commands.
#[derive(Debug, Default)]
pub struct SystemEnvironment {
    host_version: OnceLock<Option<String>>,
}

impl SystemEnvironment {
    pub fn new() -> Self {
        Self::default()
    }
}

/// First whitespace-separated token that starts with a digit and holds only
/// digits and dots.
pub fn parse_version(output: &str) -> Option<String> {
    output
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_ascii_digit()))
        .find(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_digit() || c == '.'))
        .map(String::from)
}

fn succeeds(command: &mut Command) -> Option<(bool, String)> {
    let output = command.stdin(Stdio::null()).stderr(Stdio::null()).output().ok()?;
    Some((
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).trim().to_string(),
    ))
}

impl Environment for SystemEnvironment {
    fn host_version(&self) -> Option<String> {
        self.host_version
            .get_or_init(|| {
                let (ok, stdout) = succeeds(Command::new(HOST).arg("--version"))?;
                let version = ok.then(|| parse_version(&stdout)).flatten();
                debug!(version = ?version, "probed host version");
                version
            })
            .clone()
    }

    fn dependency(&self, name: &str, constraint: &str) -> DependencyStatus {
        let gem = succeeds(
            Command::new("gem")
                .args(["list", "-i", name, "-v"])
                .arg(constraint),
        );
        if let Some((true, stdout)) = &gem
            && stdout == "true"
        {
            return DependencyStatus::Satisfied;
        }

        let script = format!("require '{}'", name.replace('\'', ""));
        match succeeds(Command::new("ruby").args(["-e", &script])) {
            Some((true, _)) => DependencyStatus::Unverified,
            _ => DependencyStatus::Missing,
        }
    }

    fn reload(&self) -> Result<()> {
        let status = Command::new(CONTROL)
            .arg("-r")
            .stdin(Stdio::null())
            .status()
            .map_err(|e| Error::Host(format!("cannot run `{CONTROL}': {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Host("cannot reload sublets".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_from_banner() {
        assert_eq!(
            parse_version("subtle 0.10.3000 - Copyright (c) 2005-2012 Christoph Kappel"),
            Some("0.10.3000".into())
        );
        assert_eq!(parse_version("subtle v0.9.2"), Some("0.9.2".into()));
        assert_eq!(parse_version("unknown"), None);
    }
}
