//! Shared fixtures: a temporary install tree and a mock repository service.

use crate::prompt::Prompt;
use crate::repository::Repository;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use sur_archive::Destinations;
use sur_config::SurConfig;
use sur_core::{DependencyStatus, Environment, Result, Specification, catalog};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Host version reported by [`FakeEnv`].
pub const HOST_VERSION: &str = "0.10.3000";

/// Environment with a fixed host version and a reload counter.
#[derive(Debug, Default)]
pub struct FakeEnv {
    pub reloads: Arc<AtomicUsize>,
    pub missing: Vec<String>,
}

impl Environment for FakeEnv {
    fn host_version(&self) -> Option<String> {
        Some(HOST_VERSION.to_string())
    }

    fn dependency(&self, name: &str, _constraint: &str) -> DependencyStatus {
        if self.missing.iter().any(|m| m == name) {
            DependencyStatus::Missing
        } else {
            DependencyStatus::Satisfied
        }
    }

    fn reload(&self) -> Result<()> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Prompt with canned answers that records what it was shown.
#[derive(Debug)]
pub struct ScriptedPrompt {
    answer: bool,
    order: Vec<usize>,
    asked: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompt {
    pub fn new(answer: bool, order: Vec<usize>) -> Self {
        Self {
            answer,
            order,
            asked: Arc::default(),
        }
    }

    pub fn asked(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.asked)
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, _question: &str, details: &[String]) -> Result<bool> {
        self.asked.lock().unwrap().extend_from_slice(details);
        Ok(self.answer)
    }

    fn order(&self, items: &[String]) -> Result<Vec<usize>> {
        self.asked.lock().unwrap().extend_from_slice(items);
        Ok(self.order.clone())
    }
}

/// A valid specification with one file and one icon, named after `name`.
pub fn sublet(name: &str, version: &str) -> Specification {
    let lower = name.to_lowercase();
    let mut spec = Specification {
        authors: vec!["unexist".into()],
        contact: "unexist@subforge.org".into(),
        description: format!("{name} sublet"),
        tags: vec!["Test".into()],
        files: vec![format!("{lower}.rb")],
        icons: vec![format!("icons/{lower}.xbm")],
        ..Specification::new(name, version)
    };
    spec.digest = Some(spec.stem());
    spec
}

pub struct Fixture {
    dir: TempDir,
    pub config: SurConfig,
    pub server: MockServer,
    reloads: Arc<AtomicUsize>,
}

impl Fixture {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;
        let config = SurConfig::with_bases(&dir.path().join("cache"), &dir.path().join("data"))
            .with_host(&server.uri())
            .unwrap()
            .with_user(Some("unexist".into()));
        config.ensure_dirs().unwrap();

        Self {
            dir,
            config,
            server,
            reloads: Arc::default(),
        }
    }

    /// Repository over this fixture, counting reloads.
    pub fn repository(&self) -> Repository {
        self.repository_missing(&[])
    }

    /// Like [`Fixture::repository`], with `missing` reported as absent
    /// dependencies.
    pub fn repository_missing(&self, missing: &[&str]) -> Repository {
        let env = FakeEnv {
            reloads: Arc::clone(&self.reloads),
            missing: missing.iter().map(|m| (*m).to_string()).collect(),
        };
        Repository::new(self.config.clone(), Box::new(env)).unwrap()
    }

    pub fn repository_with(config: SurConfig) -> Repository {
        Repository::new(config, Box::new(FakeEnv::default())).unwrap()
    }

    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    /// Write the sublet sources and build its package archive.
    pub fn package_file(&self, spec: &Specification) -> PathBuf {
        let src = self.dir.path().join("src").join(spec.stem());
        for rel in spec.files.iter().chain(&spec.icons) {
            let path = src.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, format!("# {rel}\n")).unwrap();
        }
        let definition = src.join(format!("{}.spec", spec.name.to_lowercase()));
        std::fs::write(&definition, spec.to_definition().unwrap()).unwrap();

        let out = self.dir.path().join("packages");
        std::fs::create_dir_all(&out).unwrap();
        sur_archive::build(&definition, &out).unwrap().path
    }

    /// Install `spec` into the install tree without touching any catalog.
    pub fn seed_installed(&self, spec: &Specification) {
        let archive = self.package_file(spec);
        let report = sur_archive::install_from(
            &archive,
            &Destinations {
                metadata_dir: self.config.spec_dir.clone(),
                icon_dir: self.config.icon_dir.clone(),
                file_dir: self.config.sublet_dir.clone(),
            },
        )
        .unwrap();
        assert!(report.is_complete());
    }

    pub async fn serve_catalog(&self, specs: &[Specification], expect: u64) {
        let body = catalog::encode(specs).unwrap();
        Mock::given(method("GET"))
            .and(path("/list"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(expect)
            .mount(&self.server)
            .await;
    }

    pub async fn fail_catalog(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/list"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub async fn serve_package(&self, spec: &Specification) {
        let data = std::fs::read(self.package_file(spec)).unwrap();
        let digest = spec.digest.clone().unwrap();
        Mock::given(method("GET"))
            .and(path(format!("/get/{digest}")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(data))
            .mount(&self.server)
            .await;
    }

    pub async fn accept_submissions(&self) {
        Mock::given(method("POST"))
            .and(path("/submit"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&self.server)
            .await;
    }
}
