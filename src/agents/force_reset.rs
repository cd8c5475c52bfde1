use crate::agents::interaction::Prompter;
use crate::error::{NuxupError, Result};
use crate::utils::fs::{remove_path_all, touch};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Paths removed during a force reset, fixed before any mutation happens.
#[derive(Debug, Clone)]
pub struct ResetTargets {
    pub cache_dir: String,
    pub lock_file: Option<String>,
}

impl ResetTargets {
    pub fn new(lock_file: Option<String>) -> Self {
        Self {
            cache_dir: "node_modules".to_string(),
            lock_file,
        }
    }

    fn paths(&self) -> Vec<&str> {
        let mut paths = vec![self.cache_dir.as_str()];
        if let Some(lock_file) = &self.lock_file {
            paths.push(lock_file);
        }
        paths
    }
}

/// ForceResetController decides on and performs the dependency-cache reset.
pub struct ForceResetController {
    project_path: PathBuf,
}

impl ForceResetController {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Resolve whether to reset: an explicit flag wins, otherwise ask.
    pub fn decide(&self, explicit: Option<bool>, prompter: &mut dyn Prompter) -> Result<bool> {
        match explicit {
            Some(choice) => Ok(choice),
            None => prompter.confirm(
                "Remove node_modules and the lock file before installing?",
                true,
            ),
        }
    }

    /// Remove every target, then recreate the lock file as an empty
    /// placeholder.
    ///
    /// Absent targets are skipped. A failed removal aborts the run: a
    /// half-deleted cache is worse than an intact one. The placeholder matters
    /// because some package managers treat a missing lock file differently
    /// from an empty one when regenerating state.
    pub fn apply(&self, targets: &ResetTargets) -> Result<()> {
        for relative in targets.paths() {
            let path = self.project_path.join(relative);
            remove_path_all(&path).map_err(|e| {
                NuxupError::ForceReset(format!("could not remove {}: {}", relative, e))
            })?;
            println!("   {}", format!("• removed {}", relative).dimmed());
        }

        if let Some(lock_file) = &targets.lock_file {
            let path = self.project_path.join(lock_file);
            touch(&path).map_err(|e| {
                NuxupError::ForceReset(format!("could not recreate {}: {}", lock_file, e))
            })?;
        }

        Ok(())
    }
}
