//! Terminal output for the `sur` binary.
//!
//! Progress lines are prefixed with `>>>`, nested steps with `>>>>>>`.
//! Warnings and errors carry a `WARNING`/`ERROR` tag. Colors are disabled
//! with `--no-color` or when stdout is not a terminal.

mod style;
pub mod views;

pub use style::Theme;

use std::sync::atomic::{AtomicBool, Ordering};
use sur_repository::{BatchReport, Outcome};

static COLORS: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Initialize output settings.
pub fn init(no_color: bool, quiet: bool) {
    let colors = !no_color && console::Term::stdout().features().colors_supported();
    console::set_colors_enabled(colors);
    COLORS.store(colors, Ordering::Relaxed);
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Whether colored output is enabled.
pub fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

/// Whether non-essential output is suppressed.
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// `>>> message`
pub fn status(message: &str) {
    if !is_quiet() {
        println!(">>> {message}");
    }
}

/// `>>>>>> message`
pub fn detail(message: &str) {
    if !is_quiet() {
        println!(">>>>>> {message}");
    }
}

/// `>>> WARNING: message`
pub fn warning(message: &str) {
    let tag = Theme::from_env().warning("WARNING");
    println!(">>> {tag}: {message}");
}

/// `>>> ERROR: message` on stderr
pub fn error(message: &str) {
    let tag = Theme::from_env().error("ERROR");
    eprintln!(">>> {tag}: {message}");
}

/// Print plain text unless quiet.
pub fn text(message: &str) {
    if !is_quiet() {
        println!("{message}");
    }
}

/// Print one line per name of a batch.
pub fn report(report: &BatchReport) {
    for (name, outcome) in report.entries() {
        match outcome {
            Outcome::Installed { spec, failures } => {
                for file in spec.files.iter().chain(&spec.icons) {
                    detail(&format!("Installing file `{}'", sur_core::base_name(file)));
                }
                for (entry, e) in failures {
                    warning(&format!("Cannot install `{entry}': {e}"));
                }
                status(&format!("Installed sublet {spec}"));
            }
            Outcome::Uninstalled { spec, failures } => {
                for (path, e) in failures {
                    warning(&format!("Cannot remove `{}': {e}", path.display()));
                }
                status(&format!("Uninstalled sublet {spec}"));
            }
            Outcome::Fetched { spec, path } => {
                status(&format!("Fetched sublet {spec} to {}", path.display()));
            }
            Outcome::Unpacked {
                spec,
                path,
                failures,
            } => {
                for (entry, e) in failures {
                    warning(&format!("Cannot unpack `{entry}': {e}"));
                }
                status(&format!("Unpacked sublet {spec} into {}", path.display()));
            }
            Outcome::AlreadyInstalled => {
                warning(&format!("Sublet `{name}' is already installed"));
            }
            Outcome::NotFound => warning(&format!("Cannot find sublet `{name}'")),
            Outcome::Unsatisfied { spec, diagnostics } => {
                for line in diagnostics {
                    warning(&format!("Sublet {spec}: {line}"));
                }
                warning(&format!("Skipping sublet {spec}"));
            }
            Outcome::Failed(e) => warning(&format!("Sublet `{name}': {e}")),
        }
    }
}

/// Whether a batch had a hard failure worth a non-zero exit.
pub fn has_failures(report: &BatchReport) -> bool {
    report
        .entries()
        .iter()
        .any(|(_, o)| matches!(o, Outcome::Failed(_)))
}
