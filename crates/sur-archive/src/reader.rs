//! Archive inspection and entry routing.

use std::fs::File;
use std::path::{Path, PathBuf};
use sur_core::{
    Error, ICON_EXTENSIONS, METADATA_EXTENSION, Result, Specification, base_name, extension_of,
};
use tracing::{debug, info, warn};

/// Where an archive entry belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The specification document.
    Metadata,
    /// An icon.
    Icon,
    /// Any other sublet file.
    File,
}

impl EntryKind {
    /// Classify an entry by the extension of its name.
    #[must_use]
    pub fn of(name: &str) -> Self {
        match extension_of(name) {
            Some(ext) if ext == METADATA_EXTENSION => Self::Metadata,
            Some(ext) if ICON_EXTENSIONS.contains(&ext) => Self::Icon,
            _ => Self::File,
        }
    }
}

/// Target directories for [`install_from`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    /// Receives the metadata entry as `{spec}.spec`.
    pub metadata_dir: PathBuf,
    /// Receives icons under their base name.
    pub icon_dir: PathBuf,
    /// Receives every other entry under its base name.
    pub file_dir: PathBuf,
}

/// Outcome of [`install_from`].
#[derive(Debug)]
pub struct InstallReport {
    /// Specification read from the archive.
    pub spec: Specification,
    /// Files written.
    pub placed: Vec<PathBuf>,
    /// Entries that could not be written.
    pub failures: Vec<(String, Error)>,
}

impl InstallReport {
    /// Whether every entry was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

fn open(archive: &Path) -> Result<tar::Archive<File>> {
    let file = File::open(archive).map_err(|e| Error::io(archive, e))?;
    Ok(tar::Archive::new(file))
}

fn archive_error(archive: &Path, err: &std::io::Error) -> Error {
    Error::Archive(format!("{}: {err}", archive.display()))
}

/// Names of the regular file entries, in archive order.
///
/// # Errors
/// Returns [`Error::Archive`] if the archive cannot be read.
pub fn entry_names(archive: &Path) -> Result<Vec<String>> {
    let mut tar = open(archive)?;
    let mut names = Vec::new();

    for entry in tar.entries().map_err(|e| archive_error(archive, &e))? {
        let entry = entry.map_err(|e| archive_error(archive, &e))?;
        if entry.header().entry_type().is_file() {
            let path = entry.path().map_err(|e| archive_error(archive, &e))?;
            names.push(path.to_string_lossy().into_owned());
        }
    }

    Ok(names)
}

/// Read the specification stored in a package archive.
///
/// The first entry with the metadata extension is parsed like a definition
/// file.
///
/// # Errors
/// Returns [`Error::Archive`] if the archive is unreadable or holds no
/// metadata entry, and parse or validation errors for a bad document.
pub fn extract_spec(archive: &Path) -> Result<Specification> {
    let mut tar = open(archive)?;

    for entry in tar.entries().map_err(|e| archive_error(archive, &e))? {
        let mut entry = entry.map_err(|e| archive_error(archive, &e))?;
        let name = entry
            .path()
            .map_err(|e| archive_error(archive, &e))?
            .to_string_lossy()
            .into_owned();

        if entry.header().entry_type().is_file() && EntryKind::of(&name) == EntryKind::Metadata {
            let mut data = Vec::new();
            std::io::Read::read_to_end(&mut entry, &mut data)
                .map_err(|e| archive_error(archive, &e))?;
            debug!(archive = ?archive, entry = %name, "found metadata entry");
            return Specification::parse(&data, archive);
        }
    }

    Err(Error::Archive(format!(
        "no specification found in `{}'",
        archive.display()
    )))
}

/// Route every entry of `archive` into `dest`.
///
/// Each entry is written independently: a failing entry is recorded in the
/// report and the remaining entries are still processed.
///
/// # Errors
/// Fails only if the specification cannot be read or the archive itself is
/// corrupt.
pub fn install_from(archive: &Path, dest: &Destinations) -> Result<InstallReport> {
    let spec = extract_spec(archive)?;
    let mut report = InstallReport {
        spec,
        placed: Vec::new(),
        failures: Vec::new(),
    };

    let mut tar = open(archive)?;
    for entry in tar.entries().map_err(|e| archive_error(archive, &e))? {
        let mut entry = entry.map_err(|e| archive_error(archive, &e))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let raw = entry
            .path()
            .map_err(|e| archive_error(archive, &e))?
            .to_string_lossy()
            .into_owned();
        let name = base_name(&raw).to_string();
        if name.is_empty() || name == ".." {
            warn!(entry = %raw, "skipping entry without file name");
            continue;
        }

        let target = match EntryKind::of(&name) {
            EntryKind::Metadata => dest.metadata_dir.join(report.spec.metadata_file_name()),
            EntryKind::Icon => dest.icon_dir.join(&name),
            EntryKind::File => dest.file_dir.join(&name),
        };

        match write_entry(&mut entry, &target) {
            Ok(()) => {
                debug!(entry = %name, path = ?target, "installed entry");
                report.placed.push(target);
            }
            Err(err) => {
                warn!(entry = %name, error = %err, "cannot install entry");
                report.failures.push((name, err));
            }
        }
    }

    info!(
        spec = %report.spec,
        placed = report.placed.len(),
        failed = report.failures.len(),
        "installed package"
    );
    Ok(report)
}

fn write_entry(entry: &mut tar::Entry<'_, File>, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let mut out = File::create(target).map_err(|e| Error::io(target, e))?;
    std::io::copy(entry, &mut out).map_err(|e| Error::io(target, e))?;
    Ok(())
}
