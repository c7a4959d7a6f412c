//! Install, uninstall, reorder and upgrade, plus the remote operations
//! built on the same resolution rules.
//!
//! Batch operations isolate failures per name: a name that cannot be
//! resolved or installed is recorded in the [`BatchReport`] and the batch
//! continues. Catalog-level failures abort the batch. The local catalog is
//! rebuilt from disk after every operation that changes the install tree.

use crate::outcome::{BatchReport, Outcome};
use crate::reorder::{self, Renamed};
use crate::repository::{Repository, Source};
use crate::search::SearchOptions;
use crate::upgrade::{self, UpgradeCandidate};
use std::path::{Path, PathBuf};
use sur_archive::Destinations;
use sur_core::{
    Error, PACKAGE_EXTENSION, Result, Specification, base_name, extension_of,
};
use tracing::{info, warn};

/// Result of [`Repository::upgrade`].
#[derive(Debug, Default)]
pub struct UpgradeReport {
    /// Packages with a newer remote version.
    pub candidates: Vec<UpgradeCandidate>,
    /// Whether the upgrade was carried out.
    pub applied: bool,
    /// Outcome of removing the old versions.
    pub uninstalled: BatchReport,
    /// Outcome of installing the new versions.
    pub installed: BatchReport,
}

fn remove_file(path: &Path, failures: &mut Vec<(PathBuf, Error)>) {
    match std::fs::remove_file(path) {
        Ok(()) => info!(path = ?path, "removed file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            warn!(path = ?path, error = %e, "cannot remove file");
            failures.push((path.to_path_buf(), Error::io(path, e)));
        }
    }
}

impl Repository {
    fn install_tree(&self) -> Destinations {
        Destinations {
            metadata_dir: self.config.spec_dir.clone(),
            icon_dir: self.config.icon_dir.clone(),
            file_dir: self.config.sublet_dir.clone(),
        }
    }

    /// Install a package archive into the install tree.
    ///
    /// # Errors
    /// Returns an archive error if the specification cannot be read.
    pub fn install_archive(&self, archive: &Path) -> Result<Outcome> {
        self.config.ensure_dirs()?;
        let report = sur_archive::install_from(archive, &self.install_tree())?;
        Ok(Outcome::Installed {
            spec: report.spec,
            failures: report.failures,
        })
    }

    async fn install_one(&mut self, name: &str, options: &SearchOptions) -> Result<Outcome> {
        if self.resolve(name, Source::Local, options).await?.is_some() {
            warn!(name, "sublet is already installed");
            return Ok(Outcome::AlreadyInstalled);
        }

        let path = Path::new(name);
        if path.is_file() {
            return self.install_archive(path);
        }

        let Some(spec) = self.resolve(name, Source::Remote, options).await? else {
            warn!(name, "cannot find sublet in remote repository");
            return Ok(Outcome::NotFound);
        };

        let check = spec.check_requirements(self.env.as_ref());
        if !check.is_satisfied() {
            let diagnostics = check.diagnostics();
            for line in &diagnostics {
                warn!(spec = %spec, "{line}");
            }
            return Ok(Outcome::Unsatisfied { spec, diagnostics });
        }

        let temp = self.client.download(&spec, self.progress.as_ref()).await?;
        self.install_archive(temp.path())
    }

    /// Install packages by name or archive path.
    ///
    /// Names already installed are skipped, as are packages the environment
    /// cannot satisfy. The host is asked to reload if `reload` is set.
    ///
    /// # Errors
    /// Returns catalog-level errors; per-name failures are reported.
    pub async fn install(
        &mut self,
        names: &[String],
        options: &SearchOptions,
        reload: bool,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::new();
        let mut aborted = None;

        for name in names {
            match self.install_one(name, options).await {
                Ok(outcome) => report.push(name, outcome),
                Err(e) if e.is_per_name() => {
                    warn!(name = %name, error = %e, "cannot install sublet");
                    report.push(name, Outcome::Failed(e));
                }
                Err(e) => {
                    aborted = Some(e);
                    break;
                }
            }
        }

        self.build_local(true)?;
        if let Some(e) = aborted {
            return Err(e);
        }
        if reload {
            self.env.reload()?;
        }
        Ok(report)
    }

    fn remove_installed(&self, spec: &Specification) -> Result<Vec<(PathBuf, Error)>> {
        let mut failures = Vec::new();

        let installed = reorder::installed_files(&self.config.sublet_dir)?;
        for file in &spec.files {
            for candidate in installed.iter().filter(|c| reorder::is_installed_copy(file, c)) {
                remove_file(&self.config.sublet_dir.join(candidate), &mut failures);
            }
        }

        for icon in &spec.icons {
            remove_file(&self.config.icon_dir.join(base_name(icon)), &mut failures);
        }

        let metadata = spec
            .source_path
            .clone()
            .unwrap_or_else(|| self.config.spec_dir.join(spec.metadata_file_name()));
        remove_file(&metadata, &mut failures);

        Ok(failures)
    }

    /// Remove installed packages.
    ///
    /// Files already gone are ignored. The host is asked to reload if
    /// `reload` is set.
    ///
    /// # Errors
    /// Returns catalog-level errors; per-name failures are reported.
    pub async fn uninstall(
        &mut self,
        names: &[String],
        options: &SearchOptions,
        reload: bool,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::new();

        for name in names {
            let outcome = match self.resolve(name, Source::Local, options).await {
                Ok(Some(spec)) => match self.remove_installed(&spec) {
                    Ok(failures) => {
                        info!(spec = %spec, "uninstalled sublet");
                        Outcome::Uninstalled { spec, failures }
                    }
                    Err(e) => Outcome::Failed(e),
                },
                Ok(None) => {
                    warn!(name = %name, "cannot find sublet in local repository");
                    Outcome::NotFound
                }
                Err(e) if e.is_per_name() => Outcome::Failed(e),
                Err(e) => return Err(e),
            };
            report.push(name, outcome);
        }

        self.build_local(true)?;
        if reload {
            self.env.reload()?;
        }
        Ok(report)
    }

    /// Interactively assign load-order prefixes to installed files.
    ///
    /// # Errors
    /// Returns IO errors from scanning or renaming and prompt errors.
    pub fn reorder(&mut self) -> Result<Vec<Renamed>> {
        let local = self.build_local(false)?.to_vec();
        let entries = reorder::candidates(&local, &self.config.sublet_dir)?;
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let labels: Vec<String> = entries
            .iter()
            .map(|e| format!("{} ({}) {}", e.name, e.version, e.file))
            .collect();
        let order = self.prompt.order(&labels)?;
        if order.is_empty() {
            return Ok(Vec::new());
        }

        let renamed = reorder::apply(&self.config.sublet_dir, &entries, &order)?;
        self.build_local(true)?;
        Ok(renamed)
    }

    /// Local packages with a newer remote version.
    ///
    /// # Errors
    /// Returns catalog build errors.
    pub async fn upgrade_candidates(&mut self) -> Result<Vec<UpgradeCandidate>> {
        let local = self.build_local(false)?.to_vec();
        let remote = self.build_remote(false).await?;
        Ok(upgrade::candidates(&local, remote))
    }

    /// Replace every package that has a newer remote version.
    ///
    /// Unless `assume_yes` is set the user is asked first.
    ///
    /// # Errors
    /// Returns catalog-level errors and prompt errors.
    pub async fn upgrade(&mut self, reload: bool, assume_yes: bool) -> Result<UpgradeReport> {
        let candidates = self.upgrade_candidates().await?;
        if candidates.is_empty() {
            return Ok(UpgradeReport::default());
        }

        let details: Vec<String> = candidates
            .iter()
            .map(|c| format!("{}: {} -> {}", c.name, c.from, c.to))
            .collect();
        for line in &details {
            info!("{line}");
        }

        if !assume_yes && !self.prompt.confirm("Upgrade sublets?", &details)? {
            return Ok(UpgradeReport {
                candidates,
                ..UpgradeReport::default()
            });
        }

        let names: Vec<String> = candidates.iter().map(|c| c.name.clone()).collect();
        let uninstalled = self.uninstall(&names, &SearchOptions::new(), false).await?;

        let mut installed = BatchReport::new();
        for candidate in &candidates {
            let pinned = SearchOptions::new().version(Some(candidate.to.as_str()));
            let batch = self
                .install(std::slice::from_ref(&candidate.name), &pinned, false)
                .await?;
            for (name, outcome) in batch {
                installed.push(name, outcome);
            }
        }

        if reload {
            self.env.reload()?;
        }

        Ok(UpgradeReport {
            candidates,
            applied: true,
            uninstalled,
            installed,
        })
    }

    /// Download packages into `dest` as `{name}-{version}.package`.
    ///
    /// # Errors
    /// Returns catalog-level errors; per-name failures are reported.
    pub async fn fetch(
        &mut self,
        names: &[String],
        options: &SearchOptions,
        dest: &Path,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::new();

        for name in names {
            let outcome = match self.fetch_one(name, options, dest).await {
                Ok(outcome) => outcome,
                Err(e) if e.is_per_name() => Outcome::Failed(e),
                Err(e) => return Err(e),
            };
            report.push(name, outcome);
        }

        Ok(report)
    }

    async fn fetch_one(
        &mut self,
        name: &str,
        options: &SearchOptions,
        dest: &Path,
    ) -> Result<Outcome> {
        let Some(spec) = self.resolve(name, Source::Remote, options).await? else {
            warn!(name, "cannot find sublet in remote repository");
            return Ok(Outcome::NotFound);
        };
        spec.validate()?;

        let temp = self.client.download(&spec, self.progress.as_ref()).await?;
        let path = dest.join(spec.package_file_name());
        std::fs::copy(temp.path(), &path).map_err(|e| Error::io(&path, e))?;
        info!(spec = %spec, path = ?path, "fetched sublet");
        Ok(Outcome::Fetched { spec, path })
    }

    /// Download packages and unpack each into `dest/{name}-{version}/`,
    /// icons into its `icons/` subfolder.
    ///
    /// # Errors
    /// Returns catalog-level errors; per-name failures are reported.
    pub async fn unpack(
        &mut self,
        names: &[String],
        options: &SearchOptions,
        dest: &Path,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::new();

        for name in names {
            let outcome = match self.unpack_one(name, options, dest).await {
                Ok(outcome) => outcome,
                Err(e) if e.is_per_name() => Outcome::Failed(e),
                Err(e) => return Err(e),
            };
            report.push(name, outcome);
        }

        self.build_local(true)?;
        Ok(report)
    }

    async fn unpack_one(
        &mut self,
        name: &str,
        options: &SearchOptions,
        dest: &Path,
    ) -> Result<Outcome> {
        let Some(spec) = self.resolve(name, Source::Remote, options).await? else {
            warn!(name, "cannot find sublet in remote repository");
            return Ok(Outcome::NotFound);
        };
        spec.validate()?;

        let temp = self.client.download(&spec, self.progress.as_ref()).await?;
        let base = dest.join(spec.stem());
        let icons = base.join("icons");
        std::fs::create_dir_all(&icons).map_err(|e| Error::io(&icons, e))?;

        let report = sur_archive::install_from(
            temp.path(),
            &Destinations {
                metadata_dir: base.clone(),
                icon_dir: icons,
                file_dir: base.clone(),
            },
        )?;

        Ok(Outcome::Unpacked {
            spec: report.spec,
            path: base,
            failures: report.failures,
        })
    }

    /// Upload a package archive and refresh the remote catalog.
    ///
    /// # Errors
    /// Returns [`Error::FileMissing`] unless `archive` is an existing
    /// package file, specification errors for a bad archive and
    /// [`Error::Repository`] if the upload is rejected.
    pub async fn submit(&mut self, archive: &Path) -> Result<Specification> {
        let is_package = extension_of(&archive.to_string_lossy()) == Some(PACKAGE_EXTENSION);
        if !archive.is_file() || !is_package {
            return Err(Error::FileMissing {
                path: archive.to_path_buf(),
            });
        }

        let spec = sur_archive::extract_spec(archive)?;
        self.client.submit(archive).await?;
        info!(spec = %spec, "submitted sublet");

        self.build_remote(true).await?;
        Ok(spec)
    }

    /// Flag a published package for review.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the package is unknown.
    pub async fn annotate(&mut self, name: &str, version: Option<&str>) -> Result<Specification> {
        let options = SearchOptions::new().version(version);
        let spec = self
            .resolve(name, Source::Remote, &options)
            .await?
            .ok_or_else(|| Error::NotFound {
                name: name.to_string(),
            })?;

        let digest = spec.digest.as_deref().ok_or_else(|| Error::NotFound {
            name: spec.to_string(),
        })?;
        self.client.annotate(digest).await?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Fixture, ScriptedPrompt, sublet};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| (*n).to_string()).collect()
    }

    #[tokio::test]
    async fn install_downloads_and_places_files() {
        let fixture = Fixture::new().await;
        let clock = sublet("Clock", "0.3");
        fixture.serve_catalog(&[clock.clone()], 1).await;
        fixture.serve_package(&clock).await;

        let mut repo = fixture.repository();
        let report = repo
            .install(&names(&["clock"]), &SearchOptions::new(), true)
            .await
            .unwrap();

        assert!(report.is_success(), "{report:?}");
        assert!(fixture.config.spec_dir.join("clock-0.3.spec").is_file());
        assert!(fixture.config.sublet_dir.join("clock.rb").is_file());
        assert!(fixture.config.icon_dir.join("clock.xbm").is_file());
        assert_eq!(repo.build_local(false).unwrap().len(), 1);
        assert_eq!(fixture.reloads(), 1);
    }

    #[tokio::test]
    async fn install_of_installed_name_is_a_warning() {
        let fixture = Fixture::new().await;
        fixture.seed_installed(&sublet("Clock", "0.1"));

        let mut repo = fixture.repository();
        let report = repo
            .install(&names(&["clock"]), &SearchOptions::new(), false)
            .await
            .unwrap();

        assert!(matches!(report.get("clock"), Some(Outcome::AlreadyInstalled)));
        assert_eq!(repo.build_local(false).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn install_continues_after_missing_names() {
        let fixture = Fixture::new().await;
        let clock = sublet("Clock", "0.3");
        fixture.serve_catalog(&[clock.clone()], 1).await;
        fixture.serve_package(&clock).await;

        let mut repo = fixture.repository();
        let report = repo
            .install(&names(&["weather", "clock"]), &SearchOptions::new(), false)
            .await
            .unwrap();

        assert!(matches!(report.get("weather"), Some(Outcome::NotFound)));
        assert!(matches!(report.get("clock"), Some(Outcome::Installed { .. })));
    }

    #[tokio::test]
    async fn install_skips_unsatisfied_packages() {
        let fixture = Fixture::new().await;
        let mut clock = sublet("Clock", "0.3");
        clock.required_host_version = Some("9.9.9".into());
        fixture.serve_catalog(&[clock], 1).await;

        let mut repo = fixture.repository();
        let report = repo
            .install(&names(&["clock"]), &SearchOptions::new(), false)
            .await
            .unwrap();

        match report.get("clock") {
            Some(Outcome::Unsatisfied { diagnostics, .. }) => assert_eq!(diagnostics.len(), 1),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(repo.build_local(false).unwrap().is_empty());
    }

    #[tokio::test]
    async fn install_skips_missing_dependencies() {
        let fixture = Fixture::new().await;
        let mut clock = sublet("Clock", "0.3");
        clock.add_dependency("json", "~> 1.0");
        fixture.serve_catalog(&[clock], 1).await;
        Mock::given(method("GET"))
            .and(path("/get/clock-0.3"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&fixture.server)
            .await;

        let mut repo = fixture.repository_missing(&["json"]);
        let report = repo
            .install(&names(&["clock"]), &SearchOptions::new(), false)
            .await
            .unwrap();

        match report.get("clock") {
            Some(Outcome::Unsatisfied { diagnostics, .. }) => {
                assert_eq!(diagnostics.len(), 1);
                assert!(diagnostics[0].contains("json"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(repo.build_local(false).unwrap().is_empty());
    }

    #[tokio::test]
    async fn install_from_local_archive() {
        let fixture = Fixture::new().await;
        let archive = fixture.package_file(&sublet("Cpu", "0.2"));

        let mut repo = fixture.repository();
        let report = repo
            .install(
                &[archive.to_string_lossy().into_owned()],
                &SearchOptions::new(),
                false,
            )
            .await
            .unwrap();

        assert!(report.is_success());
        assert!(repo.installed("cpu").unwrap().is_some());
    }

    #[tokio::test]
    async fn unreachable_remote_aborts_install() {
        let fixture = Fixture::new().await;
        fixture.fail_catalog(502).await;

        let mut repo = fixture.repository();
        assert!(matches!(
            repo.install(&names(&["clock"]), &SearchOptions::new(), false)
                .await,
            Err(Error::Repository { .. })
        ));
    }

    #[tokio::test]
    async fn uninstall_removes_reordered_files() {
        let fixture = Fixture::new().await;
        fixture.seed_installed(&sublet("Clock", "0.1"));
        let sublets = &fixture.config.sublet_dir;
        std::fs::rename(sublets.join("clock.rb"), sublets.join("010_clock.rb")).unwrap();

        let mut repo = fixture.repository();
        let report = repo
            .uninstall(&names(&["clock"]), &SearchOptions::new(), false)
            .await
            .unwrap();

        assert!(report.is_success());
        assert!(!sublets.join("010_clock.rb").exists());
        assert!(!fixture.config.icon_dir.join("clock.xbm").exists());
        assert!(!fixture.config.spec_dir.join("clock-0.1.spec").exists());
        assert!(repo.build_local(false).unwrap().is_empty());
    }

    #[tokio::test]
    async fn uninstall_tolerates_missing_files() {
        let fixture = Fixture::new().await;
        fixture.seed_installed(&sublet("Clock", "0.1"));
        std::fs::remove_file(fixture.config.sublet_dir.join("clock.rb")).unwrap();
        std::fs::remove_file(fixture.config.icon_dir.join("clock.xbm")).unwrap();

        let mut repo = fixture.repository();
        let report = repo
            .uninstall(&names(&["clock", "cpu"]), &SearchOptions::new(), true)
            .await
            .unwrap();

        assert!(matches!(report.get("clock"), Some(Outcome::Uninstalled { .. })));
        assert!(matches!(report.get("cpu"), Some(Outcome::NotFound)));
        assert!(!fixture.config.spec_dir.join("clock-0.1.spec").exists());
        assert_eq!(fixture.reloads(), 1);
    }

    #[tokio::test]
    async fn reorder_follows_prompt() {
        let fixture = Fixture::new().await;
        fixture.seed_installed(&sublet("Clock", "0.1"));
        fixture.seed_installed(&sublet("Cpu", "0.2"));

        let mut repo = fixture
            .repository()
            .with_prompt(Box::new(ScriptedPrompt::new(true, vec![2, 1])));
        let renamed = repo.reorder().unwrap();

        assert_eq!(renamed.len(), 2);
        assert!(fixture.config.sublet_dir.join("010_cpu.rb").is_file());
        assert!(fixture.config.sublet_dir.join("020_clock.rb").is_file());
    }

    #[tokio::test]
    async fn upgrade_replaces_older_versions() {
        let fixture = Fixture::new().await;
        fixture.seed_installed(&sublet("Clock", "0.1"));
        let newer = sublet("Clock", "0.3");
        fixture
            .serve_catalog(&[sublet("Clock", "0.1"), newer.clone()], 1)
            .await;
        fixture.serve_package(&newer).await;

        let prompt = ScriptedPrompt::new(true, Vec::new());
        let asked = prompt.asked();
        let mut repo = fixture.repository().with_prompt(Box::new(prompt));
        let report = repo.upgrade(false, false).await.unwrap();

        assert!(report.applied);
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(asked.lock().unwrap().as_slice(), ["Clock: 0.1 -> 0.3"]);
        assert!(report.installed.is_success(), "{report:?}");

        let local = repo.build_local(false).unwrap();
        assert_eq!(local.len(), 1);
        assert_eq!(local[0].version, "0.3");
    }

    #[tokio::test]
    async fn declined_upgrade_changes_nothing() {
        let fixture = Fixture::new().await;
        fixture.seed_installed(&sublet("Clock", "0.1"));
        fixture
            .serve_catalog(&[sublet("Clock", "0.1"), sublet("Clock", "0.3")], 1)
            .await;

        let mut repo = fixture
            .repository()
            .with_prompt(Box::new(ScriptedPrompt::new(false, Vec::new())));
        let report = repo.upgrade(false, false).await.unwrap();

        assert!(!report.applied);
        assert!(fixture.config.spec_dir.join("clock-0.1.spec").is_file());
    }

    #[tokio::test]
    async fn upgrade_without_candidates_is_a_no_op() {
        let fixture = Fixture::new().await;
        fixture.seed_installed(&sublet("Clock", "0.3"));
        fixture.serve_catalog(&[sublet("Clock", "0.1")], 1).await;

        let mut repo = fixture.repository();
        let report = repo.upgrade(true, true).await.unwrap();

        assert!(report.candidates.is_empty());
        assert!(!report.applied);
        assert_eq!(fixture.reloads(), 0);
    }

    #[tokio::test]
    async fn fetch_copies_archive() {
        let fixture = Fixture::new().await;
        let clock = sublet("Clock", "0.3");
        fixture.serve_catalog(&[clock.clone()], 1).await;
        fixture.serve_package(&clock).await;
        let dest = tempfile::tempdir().unwrap();

        let mut repo = fixture.repository();
        let report = repo
            .fetch(&names(&["clock", "weather"]), &SearchOptions::new(), dest.path())
            .await
            .unwrap();

        assert!(matches!(report.get("clock"), Some(Outcome::Fetched { .. })));
        assert!(matches!(report.get("weather"), Some(Outcome::NotFound)));
        assert!(dest.path().join("clock-0.3.package").is_file());
    }

    #[tokio::test]
    async fn unpack_creates_folder() {
        let fixture = Fixture::new().await;
        let clock = sublet("Clock", "0.3");
        fixture.serve_catalog(&[clock.clone()], 1).await;
        fixture.serve_package(&clock).await;
        let dest = tempfile::tempdir().unwrap();

        let mut repo = fixture.repository();
        let report = repo
            .unpack(&names(&["clock"]), &SearchOptions::new(), dest.path())
            .await
            .unwrap();

        assert!(report.is_success());
        let base = dest.path().join("clock-0.3");
        assert!(base.join("clock-0.3.spec").is_file());
        assert!(base.join("clock.rb").is_file());
        assert!(base.join("icons").join("clock.xbm").is_file());
    }

    #[tokio::test]
    async fn missing_package_download_is_per_name() {
        let fixture = Fixture::new().await;
        fixture.serve_catalog(&[sublet("Clock", "0.3")], 1).await;
        let dest = tempfile::tempdir().unwrap();

        let mut repo = fixture.repository();
        let report = repo
            .fetch(&names(&["clock"]), &SearchOptions::new(), dest.path())
            .await
            .unwrap();

        assert!(matches!(
            report.get("clock"),
            Some(Outcome::Failed(Error::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn fetch_rejects_traversing_names() {
        let fixture = Fixture::new().await;
        let mut evil = sublet("Clock", "0.3");
        evil.version = "../../0.3".into();
        fixture.serve_catalog(&[evil], 1).await;
        let root = tempfile::tempdir().unwrap();
        let dest = root.path().join("a").join("b");
        std::fs::create_dir_all(&dest).unwrap();

        let mut repo = fixture.repository();
        let report = repo
            .fetch(&names(&["clock"]), &SearchOptions::new(), &dest)
            .await
            .unwrap();

        assert!(matches!(
            report.get("clock"),
            Some(Outcome::Failed(Error::UnsafeName { field: "version", .. }))
        ));
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn submit_requires_package_file() {
        let fixture = Fixture::new().await;
        let dir = tempfile::tempdir().unwrap();
        let stray = dir.path().join("clock.tar");
        std::fs::write(&stray, "").unwrap();

        let mut repo = fixture.repository();
        assert!(matches!(
            repo.submit(&stray).await,
            Err(Error::FileMissing { .. })
        ));
        assert!(matches!(
            repo.submit(&dir.path().join("gone.package")).await,
            Err(Error::FileMissing { .. })
        ));
    }

    #[tokio::test]
    async fn submit_uploads_and_refreshes() {
        let fixture = Fixture::new().await;
        let archive = fixture.package_file(&sublet("Cpu", "0.2"));
        fixture.accept_submissions().await;
        fixture.serve_catalog(&[sublet("Cpu", "0.2")], 1).await;

        let mut repo = fixture.repository();
        let spec = repo.submit(&archive).await.unwrap();

        assert_eq!(spec.to_string(), "cpu-0.2");
        assert_eq!(repo.build_remote(false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn annotate_unknown_sublet() {
        let fixture = Fixture::new().await;
        fixture.serve_catalog(&[sublet("Clock", "0.3")], 1).await;

        let mut repo = fixture.repository();
        assert!(matches!(
            repo.annotate("weather", None).await,
            Err(Error::NotFound { .. })
        ));
    }
}
