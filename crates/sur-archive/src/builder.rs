//! Archive creation from a definition file.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use sur_core::{Error, Result, Specification, base_name, is_exact_pin};
use tracing::{debug, info, warn};

/// Permission bits stored for every entry.
pub const ENTRY_MODE: u32 = 0o644;

/// Result of [`build`].
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// The packaged specification.
    pub spec: Specification,
    /// Written archive.
    pub path: PathBuf,
    /// Non-fatal remarks such as pinned dependency versions.
    pub warnings: Vec<String>,
}

/// Build a package archive from the definition at `definition` into `out_dir`.
///
/// The archive is named `{name}-{version}.package` (lower-cased) and holds the
/// definition file, then every entry of `files`, then every entry of `icons`.
///
/// # Errors
/// Returns a parse or validation error for a bad definition,
/// [`Error::FileMissing`] if a referenced file does not exist, and an IO
/// error if the archive cannot be written.
pub fn build(definition: &Path, out_dir: &Path) -> Result<BuildOutput> {
    let spec = Specification::load(definition)?;
    let base = spec.base_dir().unwrap_or_else(|| Path::new("."));

    let mut sources = vec![definition.to_path_buf()];
    for rel in spec.files.iter().chain(&spec.icons) {
        let path = base.join(rel);
        if !path.is_file() {
            return Err(Error::FileMissing { path });
        }
        sources.push(path);
    }

    let warnings = pin_warnings(&spec);
    for line in &warnings {
        warn!(spec = %spec, "{line}");
    }

    let path = out_dir.join(spec.package_file_name());
    write_archive(&path, &sources)?;

    info!(spec = %spec, path = ?path, entries = sources.len(), "built package");
    Ok(BuildOutput {
        spec,
        path,
        warnings,
    })
}

fn pin_warnings(spec: &Specification) -> Vec<String> {
    spec.dependencies
        .iter()
        .filter(|(_, constraint)| is_exact_pin(constraint))
        .map(|(name, constraint)| {
            format!(
                "dependency `{name}' is pinned to `{constraint}'; \
                 prefer a range like `>= {constraint}'"
            )
        })
        .collect()
}

fn write_archive(path: &Path, sources: &[PathBuf]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut builder = tar::Builder::new(file);
    let mtime = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();

    for source in sources {
        let data = std::fs::read(source).map_err(|e| Error::io(source, e))?;
        let name = base_name(&source.to_string_lossy()).to_string();

        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(ENTRY_MODE);
        header.set_mtime(mtime);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_cksum();

        builder
            .append_data(&mut header, &name, data.as_slice())
            .map_err(|e| Error::Archive(format!("cannot add `{name}': {e}")))?;
        debug!(entry = %name, size = data.len(), "added archive entry");
    }

    let mut file = builder
        .into_inner()
        .map_err(|e| Error::Archive(e.to_string()))?;
    file.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}
