use crate::error::{NuxupError, Result};
use colored::Colorize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Package managers the upgrade flow knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// All known managers, in detection order.
    pub const ALL: &'static [PackageManager] = &[Self::Npm, Self::Yarn, Self::Pnpm, Self::Bun];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }

    /// Lock files that identify this manager, in priority order.
    pub fn lock_file_candidates(&self) -> &'static [&'static str] {
        match self {
            Self::Npm => &["package-lock.json"],
            Self::Yarn => &["yarn.lock"],
            Self::Pnpm => &["pnpm-lock.yaml"],
            Self::Bun => &["bun.lock", "bun.lockb"],
        }
    }

    /// Program and leading arguments used to add dependencies.
    pub fn install_command(&self, dev: bool) -> (&'static str, Vec<&'static str>) {
        let (program, subcommand) = match self {
            Self::Npm => ("npm", "install"),
            Self::Yarn => ("yarn", "add"),
            Self::Pnpm => ("pnpm", "add"),
            Self::Bun => ("bun", "add"),
        };

        let mut args = vec![subcommand];
        if dev {
            args.push(match self {
                Self::Bun => "-d",
                _ => "-D",
            });
        }

        (program, args)
    }

    fn from_field_name(name: &str) -> Option<PackageManager> {
        match name {
            "npm" => Some(Self::Npm),
            "yarn" => Some(Self::Yarn),
            "pnpm" => Some(Self::Pnpm),
            "bun" => Some(Self::Bun),
            _ => None,
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// PackageManagerProbe identifies which package manager owns the project.
pub struct PackageManagerProbe {
    project_path: PathBuf,
}

impl PackageManagerProbe {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Detect the package manager from the manifest's `packageManager` field,
    /// then from lock files on disk.
    pub fn detect(&self) -> Result<PackageManager> {
        if let Some(manager) = self.from_manifest_field() {
            if std::env::var("NUXUP_VERBOSE").is_ok() {
                println!(
                    "{}",
                    format!("Detected {} from the packageManager field", manager).dimmed()
                );
            }
            return Ok(manager);
        }

        for manager in PackageManager::ALL {
            for lock_file in manager.lock_file_candidates() {
                if self.project_path.join(lock_file).exists() {
                    if std::env::var("NUXUP_VERBOSE").is_ok() {
                        println!("{}", format!("Detected {} from {}", manager, lock_file).dimmed());
                    }
                    return Ok(*manager);
                }
            }
        }

        Err(NuxupError::PackageManagerDetection(
            "no packageManager field or known lock file found".to_string(),
        ))
    }

    /// Read the `packageManager` field, e.g. `"pnpm@9.1.0"`.
    fn from_manifest_field(&self) -> Option<PackageManager> {
        let raw = fs::read_to_string(self.project_path.join("package.json")).ok()?;
        let manifest: serde_json::Value = serde_json::from_str(&raw).ok()?;
        let field = manifest.get("packageManager")?.as_str()?;
        let name = field.split('@').next().unwrap_or(field);
        PackageManager::from_field_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn detects_from_lock_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();

        let manager = PackageManagerProbe::new(dir.path()).detect().unwrap();
        assert_eq!(manager, PackageManager::Pnpm);
    }

    #[test]
    fn package_manager_field_wins_over_lock_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package-lock.json"), "{}").unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"packageManager": "yarn@4.2.1"}"#,
        )
        .unwrap();

        let manager = PackageManagerProbe::new(dir.path()).detect().unwrap();
        assert_eq!(manager, PackageManager::Yarn);
    }

    #[test]
    fn unknown_package_manager_field_falls_back_to_lock_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bun.lockb"), "").unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"packageManager": "volta@1.0.0"}"#,
        )
        .unwrap();

        let manager = PackageManagerProbe::new(dir.path()).detect().unwrap();
        assert_eq!(manager, PackageManager::Bun);
    }

    #[test]
    fn fails_when_nothing_identifies_a_manager() {
        let dir = tempdir().unwrap();
        let err = PackageManagerProbe::new(dir.path()).detect().unwrap_err();
        assert!(matches!(err, NuxupError::PackageManagerDetection(_)));
    }

    #[test]
    fn install_command_preserves_dev_flag() {
        let (program, args) = PackageManager::Pnpm.install_command(true);
        assert_eq!(program, "pnpm");
        assert_eq!(args, vec!["add", "-D"]);

        let (program, args) = PackageManager::Bun.install_command(true);
        assert_eq!(program, "bun");
        assert_eq!(args, vec!["add", "-d"]);

        let (program, args) = PackageManager::Npm.install_command(false);
        assert_eq!(program, "npm");
        assert_eq!(args, vec!["install"]);
    }
}
