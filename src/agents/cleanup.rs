use crate::nuxt::NuxtConfigParser;
use crate::utils::fs::remove_path_all;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Generated directories that are stale after a framework upgrade, in
/// addition to the configured build directory.
const STALE_DIRS: &[&str] = &[".output", "node_modules/.vite", "node_modules/.cache"];

/// BuildArtifactCleaner removes generated build output after an upgrade.
///
/// Every removal is best-effort: a directory that cannot be removed is left
/// in place without failing the run.
pub struct BuildArtifactCleaner {
    project_path: PathBuf,
}

impl BuildArtifactCleaner {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Directories to remove: the configured build dir plus the fixed set.
    pub fn target_dirs(&self) -> Vec<String> {
        let config = NuxtConfigParser::new(&self.project_path).parse();

        let mut dirs = vec![config.build_dir];
        for dir in STALE_DIRS {
            if !dirs.iter().any(|existing| existing == dir) {
                dirs.push(dir.to_string());
            }
        }
        dirs
    }

    pub fn clean(&self) {
        let verbose = std::env::var("NUXUP_VERBOSE").is_ok();

        for dir in self.target_dirs() {
            let path = self.project_path.join(&dir);
            match remove_path_all(&path) {
                Ok(()) => {
                    if verbose {
                        println!("   {}", format!("• {}", dir).dimmed());
                    }
                }
                Err(e) => {
                    if verbose {
                        println!("   {}", format!("• {} (left in place: {})", dir, e).dimmed());
                    }
                }
            }
        }
    }
}
