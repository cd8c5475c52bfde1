use crate::agents::package_manager::PackageManager;
use crate::error::{NuxupError, Result};
use colored::Colorize;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Seam for the install step so tests can substitute the real
/// package-manager invocation.
pub trait Installer {
    fn install(&self, manager: PackageManager, packages: &[String], dev: bool) -> Result<()>;
}

/// Installs packages by driving the detected package manager as a child
/// process with live output streaming.
pub struct PackageManagerInstaller {
    project_path: PathBuf,
}

impl PackageManagerInstaller {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }
}

impl Installer for PackageManagerInstaller {
    fn install(&self, manager: PackageManager, packages: &[String], dev: bool) -> Result<()> {
        let (program, args) = manager.install_command(dev);

        println!(
            "{}",
            format!(
                "Executing: {} {} {}",
                program,
                args.join(" "),
                packages.join(" ")
            )
            .dimmed()
        );

        let mut command = Command::new(program);
        command
            .current_dir(&self.project_path)
            .args(&args)
            .args(packages)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        let mut child = command
            .spawn()
            .map_err(|e| NuxupError::Install(format!("failed to spawn {}: {}", program, e)))?;

        // Stream installer output as it arrives
        if let Some(stdout) = child.stdout.take() {
            let reader = BufReader::new(stdout);
            for line in reader.lines().map_while(|line| line.ok()) {
                println!("{}", line);
            }
        }

        let status = child
            .wait()
            .map_err(|e| NuxupError::Install(format!("failed to wait for {}: {}", program, e)))?;

        if !status.success() {
            return Err(NuxupError::Install(format!(
                "{} exited with code {}",
                program,
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}
