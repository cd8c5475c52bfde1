use crate::nuxt::PRIMARY_PACKAGE;
use colored::Colorize;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Dependency maps read from the project's `package.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManifestSnapshot {
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
}

impl ManifestSnapshot {
    /// Load the manifest, degrading to `None` when missing or unreadable.
    pub fn load<P: AsRef<Path>>(project_path: P) -> Option<ManifestSnapshot> {
        let path = project_path.as_ref().join("package.json");
        let raw = fs::read_to_string(&path).ok()?;

        match serde_json::from_str(&raw) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                if std::env::var("NUXUP_VERBOSE").is_ok() {
                    println!("{}", format!("Could not parse package.json: {}", e).dimmed());
                }
                None
            }
        }
    }

    /// Whether `name` is declared in either dependency map.
    pub fn declares(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }
}

/// Dependency class the primary package is reinstalled under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyClass {
    Production,
    Development,
}

impl DependencyClass {
    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// The `package.json` map this class corresponds to.
    pub fn manifest_key(&self) -> &'static str {
        match self {
            Self::Production => "dependencies",
            Self::Development => "devDependencies",
        }
    }
}

/// Decide which dependency class `nuxt` is reinstalled under.
///
/// Projects that declare it nowhere, or have no readable manifest at all,
/// default to a production dependency. A package declared in both maps is
/// treated as production.
pub fn classify(manifest: Option<&ManifestSnapshot>) -> DependencyClass {
    let Some(manifest) = manifest else {
        return DependencyClass::Production;
    };

    if manifest.dependencies.contains_key(PRIMARY_PACKAGE) {
        return DependencyClass::Production;
    }
    if manifest.dev_dependencies.contains_key(PRIMARY_PACKAGE) {
        return DependencyClass::Development;
    }

    DependencyClass::Production
}

/// Read the installed version of a package from `node_modules`.
///
/// Any failure (package not installed, unreadable metadata, missing or
/// malformed version field) yields `None` rather than an error.
pub fn installed_version<P: AsRef<Path>>(project_path: P, package: &str) -> Option<String> {
    let path = project_path
        .as_ref()
        .join("node_modules")
        .join(package)
        .join("package.json");

    let raw = fs::read_to_string(path).ok()?;
    let metadata: serde_json::Value = serde_json::from_str(&raw).ok()?;
    let version = metadata.get("version")?.as_str()?;

    if semver::Version::parse(version).is_err() {
        return None;
    }

    Some(version.to_string())
}
