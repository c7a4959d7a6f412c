//! Skeleton generation for new sublets.

use crate::{Error, METADATA_EXTENSION, Result, Specification};
use std::path::{Path, PathBuf};
use tracing::info;

/// Capitalize like a display name: first letter upper-case, rest lower-case.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Build the template specification for `name`.
#[must_use]
pub fn template_spec(name: &str, author: &str, date: &str) -> Specification {
    let lower = name.to_lowercase();
    Specification {
        name: capitalize(name),
        version: "0.0".into(),
        authors: vec![author.to_string()],
        contact: "YOUREMAIL".into(),
        description: "SHORT DESCRIPTION".into(),
        notes: Some("LONG DESCRIPTION".into()),
        date: Some(date.to_string()),
        files: vec![format!("{lower}.rb")],
        ..Specification::default()
    }
}

fn sublet_source(name: &str) -> String {
    format!(
        "# {} sublet file\n\
         # Created with sur-{}\n\
         configure :{} do |s|\n  s.interval = 60\nend\n\n\
         on :run do |s|\n  s.data = \"\"\nend\n",
        capitalize(name),
        crate::VERSION,
        name.to_lowercase()
    )
}

/// Write a new sublet skeleton into `parent/<name>/`.
///
/// Creates `<name>.spec` and `<name>.rb` and returns the folder.
///
/// # Errors
/// Fails if the folder already exists or files cannot be written.
pub fn write_template(parent: &Path, name: &str, author: &str, date: &str) -> Result<PathBuf> {
    let name = Path::new(name)
        .file_stem()
        .and_then(std::ffi::OsStr::to_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Config(format!("invalid sublet name `{name}'")))?;

    let folder = parent.join(name);
    if folder.exists() {
        return Err(Error::Config(format!(
            "file `{}' already exists",
            folder.display()
        )));
    }

    std::fs::create_dir_all(&folder).map_err(|e| Error::io(&folder, e))?;

    let spec = template_spec(name, author, date);
    let spec_path = folder.join(format!("{name}.{METADATA_EXTENSION}"));
    std::fs::write(&spec_path, spec.to_definition()?).map_err(|e| Error::io(&spec_path, e))?;

    let source_path = folder.join(format!("{}.rb", name.to_lowercase()));
    std::fs::write(&source_path, sublet_source(name)).map_err(|e| Error::io(&source_path, e))?;

    info!(name, folder = ?folder, "created template");
    Ok(folder)
}
