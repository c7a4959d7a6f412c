//! Sublet specification: metadata, validation and requirement checks.

use crate::environment::{DependencyStatus, Environment, RequirementCheck};
use crate::version::host_satisfies;
use crate::{Error, PACKAGE_EXTENSION, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A configurable value exposed by a sublet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigOption {
    /// Option name.
    pub name: String,
    /// Value type (`integer`, `string`, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Default value.
    #[serde(default, alias = "def_value", skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl ConfigOption {
    /// Create a config option.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        description: impl Into<String>,
        default: Option<serde_json::Value>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            description: description.into(),
            default,
        }
    }

    /// Default value rendered for display.
    #[must_use]
    pub fn default_display(&self) -> String {
        match &self.default {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Complete sublet metadata.
///
/// Definition files are declarative JSON documents. Required fields default
/// to empty so that [`Specification::validate`] can report every missing
/// field at once instead of failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    /// Sublet name.
    #[serde(default)]
    pub name: String,
    /// Version, compared as dotted numbers.
    #[serde(default)]
    pub version: String,
    /// Authors.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Contact address.
    #[serde(default)]
    pub contact: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Tags, capitalized.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Files relative to the definition.
    #[serde(default)]
    pub files: Vec<String>,
    /// Icons relative to the definition.
    #[serde(default)]
    pub icons: Vec<String>,
    /// Long-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation date as written by the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Config values.
    #[serde(default)]
    pub config: Vec<ConfigOption>,
    /// Provided grabs: handler name to description.
    #[serde(default)]
    pub grabs: BTreeMap<String, String>,
    /// External library dependencies: name to version constraint.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    /// Minimum host version.
    #[serde(
        default,
        alias = "required_version",
        alias = "subtlext_version",
        skip_serializing_if = "Option::is_none"
    )]
    pub required_host_version: Option<String>,
    /// Content digest assigned by the remote service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// Where this specification was loaded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
    /// Unrecognized attributes, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Specification {
    /// Create an empty specification.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    /// Load and validate a definition file.
    ///
    /// # Errors
    /// Returns a parse error if the file cannot be read or is not a
    /// specification document, and a validation error if required fields
    /// are missing.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| Error::parse(path, e.to_string()))?;
        let mut spec = Self::parse(&data, path)?;
        spec.source_path = Some(path.to_path_buf());
        debug!(spec = %spec, path = ?path, "loaded specification");
        Ok(spec)
    }

    /// Parse and validate definition bytes. `origin` is used for messages.
    ///
    /// # Errors
    /// Same as [`Specification::load`].
    pub fn parse(data: &[u8], origin: &Path) -> Result<Self> {
        let spec: Self =
            sonic_rs::from_slice(data).map_err(|e| Error::parse(origin, e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Serialize to a pretty definition document.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_definition(&self) -> Result<String> {
        let mut spec = self.clone();
        spec.source_path = None;
        spec.digest = None;
        Ok(sonic_rs::to_string_pretty(&spec)?)
    }

    /// Required fields that are empty, in declaration order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.trim().is_empty() {
            fields.push("name");
        }
        if self.authors.is_empty() {
            fields.push("authors");
        }
        if self.contact.trim().is_empty() {
            fields.push("contact");
        }
        if self.description.trim().is_empty() {
            fields.push("description");
        }
        if self.version.trim().is_empty() {
            fields.push("version");
        }
        if self.files.is_empty() {
            fields.push("files");
        }
        fields
    }

    /// Whether all required fields are present.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Check required fields and that name and version are usable as a
    /// single path component.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] naming every missing field, or
    /// [`Error::UnsafeName`] for a name or version containing a separator.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(Error::Validation {
                missing: missing.into_iter().map(String::from).collect(),
            });
        }
        for (field, value) in [("name", &self.name), ("version", &self.version)] {
            if !is_path_component(value) {
                return Err(Error::UnsafeName {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Add or replace a dependency.
    pub fn add_dependency(&mut self, name: impl Into<String>, constraint: impl Into<String>) {
        self.dependencies.insert(name.into(), constraint.into());
    }

    /// Check host version and dependencies against an environment.
    #[must_use]
    pub fn check_requirements(&self, env: &dyn Environment) -> RequirementCheck {
        let mut check = RequirementCheck::default();

        if let Some(required) = &self.required_host_version {
            let found = env.host_version();
            let ok = found
                .as_deref()
                .is_some_and(|have| host_satisfies(required, have));
            if !ok {
                check.host_required = Some(required.clone());
                check.host_found = found;
            }
        }

        for (name, constraint) in &self.dependencies {
            match env.dependency(name, constraint) {
                DependencyStatus::Satisfied => {}
                DependencyStatus::Unverified => check.unverified.push(name.clone()),
                DependencyStatus::Missing => check.missing.push(format!("{name} ({constraint})")),
            }
        }

        check
    }

    /// Whether this sublet can be installed in the given environment.
    ///
    /// Unmet conditions are logged; this never fails so callers can skip.
    #[must_use]
    pub fn satisfied(&self, env: &dyn Environment) -> bool {
        let check = self.check_requirements(env);
        for line in check.diagnostics() {
            warn!(spec = %self, "{line}");
        }
        check.is_satisfied()
    }

    /// Canonical file stem, `name-version` lower-cased.
    #[must_use]
    pub fn stem(&self) -> String {
        self.to_string()
    }

    /// Name of the metadata file when installed.
    #[must_use]
    pub fn metadata_file_name(&self) -> String {
        format!("{}.{}", self.stem(), crate::METADATA_EXTENSION)
    }

    /// Name of the package archive.
    #[must_use]
    pub fn package_file_name(&self) -> String {
        format!("{}.{PACKAGE_EXTENSION}", self.stem())
    }

    /// Directory of the definition file, if loaded from disk.
    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        self.source_path.as_deref().and_then(Path::parent)
    }

    /// Parsed version for ordering.
    #[must_use]
    pub fn dotted_version(&self) -> crate::DottedVersion {
        crate::DottedVersion::new(self.version.as_str())
    }
}

impl fmt::Display for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.name.to_lowercase(),
            self.version.to_lowercase()
        )
    }
}

fn is_path_component(value: &str) -> bool {
    let value = value.trim();
    value != "." && value != ".." && !value.contains(['/', '\\', '\0'])
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;

    pub(crate) fn clock(version: &str) -> Specification {
        Specification {
            name: "Clock".into(),
            version: version.into(),
            authors: vec!["unexist".into()],
            contact: "unexist@subforge.org".into(),
            description: "Show the clock".into(),
            tags: vec!["Time".into()],
            files: vec!["clock.rb".into()],
            ..Specification::default()
        }
    }

    struct FakeEnv {
        host: Option<&'static str>,
        status: DependencyStatus,
        reloads: Cell<usize>,
    }

    impl Environment for FakeEnv {
        fn host_version(&self) -> Option<String> {
            self.host.map(String::from)
        }

        fn dependency(&self, _name: &str, _constraint: &str) -> DependencyStatus {
            self.status
        }

        fn reload(&self) -> Result<()> {
            self.reloads.set(self.reloads.get() + 1);
            Ok(())
        }
    }

    fn env(host: Option<&'static str>, status: DependencyStatus) -> FakeEnv {
        FakeEnv {
            host,
            status,
            reloads: Cell::new(0),
        }
    }

    #[test]
    fn valid_spec_validates() {
        let spec = clock("0.1");
        assert!(spec.valid());
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn validate_enumerates_missing_fields() {
        let spec = Specification {
            name: "clock".into(),
            version: "0.1".into(),
            ..Specification::default()
        };
        match spec.validate() {
            Err(Error::Validation { missing }) => {
                assert_eq!(missing, ["authors", "contact", "description", "files"]);
            }
            other => panic!("unexpected: {other:?}"),
        }

        let empty = Specification::default();
        assert_eq!(empty.missing_fields().len(), 6);
    }

    #[test]
    fn validate_rejects_path_separators() {
        for name in ["../../escaped", "a/b", "a\\b", ".."] {
            let mut spec = clock("0.1");
            spec.name = name.into();
            assert!(
                matches!(spec.validate(), Err(Error::UnsafeName { field: "name", .. })),
                "{name}"
            );
        }

        let mut spec = clock("0.1");
        spec.version = "../0.1".into();
        assert!(matches!(
            spec.validate(),
            Err(Error::UnsafeName {
                field: "version",
                ..
            })
        ));

        let mut spec = clock("0.1");
        spec.name = "clock.rb".into();
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn stem_is_lowercase() {
        let spec = clock("0.1");
        assert_eq!(spec.to_string(), "clock-0.1");
        assert_eq!(spec.metadata_file_name(), "clock-0.1.spec");
        assert_eq!(spec.package_file_name(), "clock-0.1.package");
    }

    #[test]
    fn parse_definition() {
        let doc = br#"{
            "name": "Clock",
            "version": "0.3",
            "authors": ["unexist"],
            "contact": "unexist@subforge.org",
            "description": "Show the clock",
            "tags": ["Time"],
            "files": ["clock.rb"],
            "icons": ["icons/clock.xbm"],
            "config": [{"name": "format", "type": "string", "description": "Time format", "def_value": "%H:%M"}],
            "grabs": {"ClockGrab": "Toggle seconds"},
            "dependencies": {"json": "~> 1.0"},
            "required_version": "0.9.2127",
            "homepage": "http://subforge.org"
        }"#;
        let spec = Specification::parse(doc, Path::new("clock.spec")).unwrap();
        assert_eq!(spec.required_host_version.as_deref(), Some("0.9.2127"));
        assert_eq!(spec.config[0].default_display(), "%H:%M");
        assert_eq!(spec.grabs["ClockGrab"], "Toggle seconds");
        assert_eq!(
            spec.extra.get("homepage"),
            Some(&serde_json::Value::String("http://subforge.org".into()))
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = Specification::parse(b"Sur::Specification.new do |s|", Path::new("x.spec"));
        assert!(matches!(err, Err(Error::Parse { .. })));
    }

    #[test]
    fn parse_rejects_incomplete() {
        let err = Specification::parse(br#"{"name": "clock"}"#, Path::new("x.spec"));
        assert!(matches!(err, Err(Error::Validation { .. })));
    }

    #[test]
    fn load_sets_source_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clock.spec");
        std::fs::write(&path, clock("0.1").to_definition().unwrap()).unwrap();

        let spec = Specification::load(&path).unwrap();
        assert_eq!(spec.source_path.as_deref(), Some(path.as_path()));
        assert_eq!(spec.base_dir(), Some(dir.path()));
    }

    #[test]
    fn load_missing_file_is_parse_error() {
        let err = Specification::load(Path::new("/nonexistent/clock.spec"));
        assert!(matches!(err, Err(Error::Parse { .. })));
    }

    #[test]
    fn satisfied_without_requirements() {
        let spec = clock("0.1");
        assert!(spec.satisfied(&env(None, DependencyStatus::Missing)));
    }

    #[test]
    fn host_version_gate() {
        let mut spec = clock("0.1");
        spec.required_host_version = Some("0.9.2127".into());

        assert!(spec.satisfied(&env(Some("0.11.3224"), DependencyStatus::Satisfied)));
        assert!(!spec.satisfied(&env(Some("0.8.1000"), DependencyStatus::Satisfied)));
        assert!(!spec.satisfied(&env(Some("0.11"), DependencyStatus::Satisfied)));
        assert!(!spec.satisfied(&env(None, DependencyStatus::Satisfied)));
    }

    #[test]
    fn dependency_gate() {
        let mut spec = clock("0.1");
        spec.add_dependency("json", "~> 1.0");

        assert!(spec.satisfied(&env(None, DependencyStatus::Satisfied)));
        assert!(spec.satisfied(&env(None, DependencyStatus::Unverified)));

        let check = spec.check_requirements(&env(None, DependencyStatus::Missing));
        assert!(!check.is_satisfied());
        assert_eq!(check.missing, ["json (~> 1.0)"]);
        assert_eq!(check.diagnostics().len(), 1);
    }
}
