use crate::agents::{
    BuildArtifactCleaner, Channel, ChannelResolver, ConsolePrompter, ForceResetController,
    Installer, LockFileLocator, ManifestSnapshot, PackageManagerInstaller, PackageManagerProbe,
    Prompter, ResetTargets, UpgradeOutcome, UpgradeReport, VersionDiffReporter, classify,
    installed_version,
};
use crate::error::{NuxupError, Result};
use crate::nuxt::{COMPANION_PACKAGES, PRIMARY_PACKAGE};
use crate::utils::fs::resolve_project_dir;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Execute the upgrade workflow against a project directory.
pub fn execute_upgrade<P: AsRef<Path>>(
    project_path: P,
    force: Option<bool>,
    channel: Channel,
) -> Result<()> {
    let project_path = resolve_project_dir(project_path)?;
    let installer = PackageManagerInstaller::new(&project_path);
    let mut prompter = ConsolePrompter;

    let orchestrator = UpgradeOrchestrator::new(project_path);
    match orchestrator.run(channel, force, &mut prompter, &installer) {
        Err(NuxupError::UserCancelled) => {
            println!("\n{}", "Upgrade cancelled by user.".yellow());
            Ok(())
        }
        other => other,
    }
}

/// UpgradeOrchestrator drives the upgrade pipeline.
///
/// The steps run in a fixed order with no branching back: nothing is deleted
/// or installed before the package manager, target versions and reset
/// decision are all resolved, and cleanup only runs after a successful
/// install.
pub struct UpgradeOrchestrator {
    project_path: PathBuf,
}

impl UpgradeOrchestrator {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    pub fn run(
        &self,
        channel: Channel,
        force: Option<bool>,
        prompter: &mut dyn Prompter,
        installer: &dyn Installer,
    ) -> Result<()> {
        println!("{}", "Upgrading Nuxt...".cyan().bold());

        // Step 1: Detect the package manager
        println!("\n{}", "1. Detecting package manager...".yellow());
        let manager = PackageManagerProbe::new(&self.project_path).detect()?;
        println!("{}", format!("✓ Using {}", manager).green());

        // Step 2: Read the currently installed version
        println!("\n{}", "2. Reading installed Nuxt version...".yellow());
        let previous = installed_version(&self.project_path, PRIMARY_PACKAGE);
        match &previous {
            Some(version) => {
                println!("{}", format!("✓ Currently running Nuxt {}", version).green());
            }
            None => {
                println!(
                    "{}",
                    "⚠ Could not determine the installed Nuxt version".yellow()
                );
            }
        }

        // Step 3: Read the manifest and classify the dependency
        println!("\n{}", "3. Reading package manifest...".yellow());
        let manifest = ManifestSnapshot::load(&self.project_path);
        if manifest.is_none() {
            println!("{}", "⚠ No readable package.json, assuming defaults".yellow());
        }
        let dependency_class = classify(manifest.as_ref());
        let package_names = self.package_names(manifest.as_ref());
        println!(
            "{}",
            format!(
                "✓ Reinstalling {} package(s) under {}",
                package_names.len(),
                dependency_class.manifest_key()
            )
            .green()
        );

        // Step 4: Resolve target versions
        println!("\n{}", "4. Resolving target versions...".yellow());
        let selection = ChannelResolver::resolve(&package_names, channel, prompter)?;
        println!(
            "{}",
            format!("✓ Targeting the {} release", selection.version_label).green()
        );

        // Step 5: Locate the lock file and decide on the force reset
        println!("\n{}", "5. Preparing install state...".yellow());
        let lock_file =
            LockFileLocator::locate(&self.project_path, manager.lock_file_candidates());
        if lock_file.is_none() {
            eprintln!(
                "{}",
                format!(
                    "Error: no lock file found for {} in the project directory",
                    manager
                )
                .red()
            );
        }
        let targets = ResetTargets::new(lock_file);
        let reset = ForceResetController::new(&self.project_path);
        if reset.decide(force, prompter)? {
            reset.apply(&targets)?;
            println!("{}", "✓ Dependency cache reset".green());
        } else {
            println!("{}", "Keeping the existing dependency cache".dimmed());
        }

        // Step 6: Install
        println!("\n{}", format!("6. Installing with {}...", manager).yellow());
        installer.install(manager, &selection.npm_packages, dependency_class.is_dev())?;
        println!("{}", "✓ Install completed".green());

        // Step 7: Clean stale build artifacts
        println!("\n{}", "7. Cleaning up generated build output...".yellow());
        BuildArtifactCleaner::new(&self.project_path).clean();
        println!("{}", "✓ Cleanup completed".green());

        // Step 8: Read the upgraded version
        println!("\n{}", "8. Reading upgraded Nuxt version...".yellow());
        let updated = installed_version(&self.project_path, PRIMARY_PACKAGE);

        // Step 9: Report
        let report = VersionDiffReporter::diff(previous.as_deref(), updated.as_deref());
        print_report(&report);

        Ok(())
    }

    /// The primary package plus any companion packages the manifest declares.
    fn package_names(&self, manifest: Option<&ManifestSnapshot>) -> Vec<String> {
        let mut names = vec![PRIMARY_PACKAGE.to_string()];
        if let Some(manifest) = manifest {
            for companion in COMPANION_PACKAGES {
                if manifest.declares(companion) {
                    names.push(companion.to_string());
                }
            }
        }
        names
    }
}

fn print_report(report: &UpgradeReport) {
    match report.outcome {
        UpgradeOutcome::Unknown => {}
        UpgradeOutcome::UpToDate => {
            println!(
                "\n{}",
                "✨ You're already using the latest version!".green().bold()
            );
        }
        UpgradeOutcome::Upgraded => {
            let previous = report.previous.as_deref().unwrap_or("unknown");
            let updated = report.updated.as_deref().unwrap_or("unknown");
            println!(
                "\n{}",
                format!("✨ Upgraded Nuxt from {} to {}", previous, updated)
                    .green()
                    .bold()
            );
            if let Some(url) = &report.changelog_url {
                println!("{}", format!("Changelog: {}", url).cyan());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::PackageManager;
    use crate::agents::interaction::scripted::ScriptedPrompter;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::tempdir;

    #[derive(Debug, Clone)]
    struct InstallCall {
        manager: PackageManager,
        packages: Vec<String>,
        dev: bool,
    }

    /// Installer stand-in that records each invocation and optionally drops a
    /// fresh package into node_modules, like a real install would.
    struct RecordingInstaller {
        calls: RefCell<Vec<InstallCall>>,
        installs_version: Option<String>,
        project_path: PathBuf,
    }

    impl RecordingInstaller {
        fn new(project_path: &Path, installs_version: Option<&str>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                installs_version: installs_version.map(str::to_string),
                project_path: project_path.to_path_buf(),
            }
        }
    }

    impl Installer for RecordingInstaller {
        fn install(&self, manager: PackageManager, packages: &[String], dev: bool) -> Result<()> {
            self.calls.borrow_mut().push(InstallCall {
                manager,
                packages: packages.to_vec(),
                dev,
            });

            if let Some(version) = &self.installs_version {
                let package_dir = self.project_path.join("node_modules/nuxt");
                fs::create_dir_all(&package_dir)?;
                fs::write(
                    package_dir.join("package.json"),
                    format!(r#"{{"name": "nuxt", "version": "{}"}}"#, version),
                )?;
            }

            Ok(())
        }
    }

    fn write_installed_nuxt(project_path: &Path, version: &str) {
        let package_dir = project_path.join("node_modules/nuxt");
        fs::create_dir_all(&package_dir).unwrap();
        fs::write(
            package_dir.join("package.json"),
            format!(r#"{{"name": "nuxt", "version": "{}"}}"#, version),
        )
        .unwrap();
    }

    #[test]
    fn dev_dependency_is_reinstalled_as_dev_after_confirmed_reset() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"devDependencies": {"nuxt": "^3.9.0"}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("yarn.lock"), "# lock state").unwrap();
        write_installed_nuxt(dir.path(), "3.9.0");

        let installer = RecordingInstaller::new(dir.path(), Some("3.10.1"));
        let mut prompter = ScriptedPrompter::new(vec![true], Vec::new());

        UpgradeOrchestrator::new(dir.path())
            .run(Channel::Stable, None, &mut prompter, &installer)
            .unwrap();

        let calls = installer.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].manager, PackageManager::Yarn);
        assert!(calls[0].dev);
        assert_eq!(calls[0].packages, vec!["nuxt@latest"]);

        // Reset ran before the install: the lock file is an empty placeholder.
        assert_eq!(
            fs::read_to_string(dir.path().join("yarn.lock")).unwrap(),
            ""
        );
    }

    #[test]
    fn declined_reset_leaves_the_cache_in_place() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"nuxt": "^3.9.0"}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("package-lock.json"), "{}").unwrap();
        write_installed_nuxt(dir.path(), "3.9.0");

        let installer = RecordingInstaller::new(dir.path(), Some("3.9.0"));
        let mut prompter = ScriptedPrompter::new(vec![false], Vec::new());

        UpgradeOrchestrator::new(dir.path())
            .run(Channel::Stable, None, &mut prompter, &installer)
            .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("package-lock.json")).unwrap(),
            "{}"
        );
        assert!(!installer.calls.borrow()[0].dev);
    }

    #[test]
    fn explicit_no_force_skips_the_prompt_entirely() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package-lock.json"), "{}").unwrap();

        let installer = RecordingInstaller::new(dir.path(), None);
        // A scripted "yes" that must never be consulted.
        let mut prompter = ScriptedPrompter::new(vec![true], Vec::new());

        UpgradeOrchestrator::new(dir.path())
            .run(Channel::Stable, Some(false), &mut prompter, &installer)
            .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("package-lock.json")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn companion_packages_are_included_when_declared() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{
  "dependencies": {"nuxt": "^3.9.0"},
  "devDependencies": {"@nuxt/kit": "^3.9.0", "vitest": "^1.0.0"}
}"#,
        )
        .unwrap();
        fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();

        let installer = RecordingInstaller::new(dir.path(), Some("3.10.1"));
        let mut prompter = ScriptedPrompter::with_defaults();

        UpgradeOrchestrator::new(dir.path())
            .run(Channel::Stable, Some(false), &mut prompter, &installer)
            .unwrap();

        let calls = installer.calls.borrow();
        assert_eq!(calls[0].packages, vec!["nuxt@latest", "@nuxt/kit@latest"]);
        assert!(!calls[0].dev);
    }

    #[test]
    fn nightly_channel_installs_aliased_specifiers() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("yarn.lock"), "").unwrap();

        let installer = RecordingInstaller::new(dir.path(), None);
        let mut prompter = ScriptedPrompter::new(Vec::new(), vec![0]);

        UpgradeOrchestrator::new(dir.path())
            .run(Channel::Nightly, Some(false), &mut prompter, &installer)
            .unwrap();

        let calls = installer.calls.borrow();
        assert_eq!(calls[0].packages, vec!["nuxt@npm:nuxt-nightly@3x"]);
    }

    #[test]
    fn undetectable_package_manager_aborts_before_any_mutation() {
        let dir = tempdir().unwrap();
        write_installed_nuxt(dir.path(), "3.9.0");

        let installer = RecordingInstaller::new(dir.path(), None);
        let mut prompter = ScriptedPrompter::with_defaults();

        let err = UpgradeOrchestrator::new(dir.path())
            .run(Channel::Stable, Some(true), &mut prompter, &installer)
            .unwrap_err();

        assert!(matches!(err, NuxupError::PackageManagerDetection(_)));
        assert!(installer.calls.borrow().is_empty());
        assert!(dir.path().join("node_modules/nuxt").exists());
    }

    #[test]
    fn install_failure_propagates_and_skips_cleanup() {
        struct FailingInstaller;

        impl Installer for FailingInstaller {
            fn install(
                &self,
                _manager: PackageManager,
                _packages: &[String],
                _dev: bool,
            ) -> Result<()> {
                Err(NuxupError::Install("registry unreachable".to_string()))
            }
        }

        let dir = tempdir().unwrap();
        fs::write(dir.path().join("yarn.lock"), "").unwrap();
        fs::create_dir_all(dir.path().join(".nuxt")).unwrap();

        let mut prompter = ScriptedPrompter::with_defaults();
        let err = UpgradeOrchestrator::new(dir.path())
            .run(Channel::Stable, Some(false), &mut prompter, &FailingInstaller)
            .unwrap_err();

        assert!(matches!(err, NuxupError::Install(_)));
        // Cleanup never ran.
        assert!(dir.path().join(".nuxt").exists());
    }

    #[test]
    fn missing_lock_file_does_not_abort_the_run() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"packageManager": "pnpm@9.1.0"}"#,
        )
        .unwrap();

        let installer = RecordingInstaller::new(dir.path(), None);
        let mut prompter = ScriptedPrompter::with_defaults();

        UpgradeOrchestrator::new(dir.path())
            .run(Channel::Stable, Some(true), &mut prompter, &installer)
            .unwrap();

        // Reset ran without a lock-file target, so none was recreated.
        assert!(!dir.path().join("pnpm-lock.yaml").exists());
        assert_eq!(installer.calls.borrow().len(), 1);
    }

    #[test]
    fn cancelled_prompt_is_reported_as_a_graceful_exit() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("yarn.lock"), "").unwrap();

        struct CancellingPrompter;

        impl Prompter for CancellingPrompter {
            fn confirm(&mut self, _message: &str, _default: bool) -> Result<bool> {
                Err(NuxupError::UserCancelled)
            }

            fn select(
                &mut self,
                _message: &str,
                _options: &[String],
                default: usize,
            ) -> Result<usize> {
                Ok(default)
            }
        }

        let installer = RecordingInstaller::new(dir.path(), None);
        let err = UpgradeOrchestrator::new(dir.path())
            .run(Channel::Stable, None, &mut CancellingPrompter, &installer)
            .unwrap_err();

        assert!(matches!(err, NuxupError::UserCancelled));
        assert!(installer.calls.borrow().is_empty());
    }
}
