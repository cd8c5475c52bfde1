use std::path::Path;

/// LockFileLocator resolves which lock file is authoritative for the project.
pub struct LockFileLocator;

impl LockFileLocator {
    /// Return the first candidate that exists under `project_path`.
    ///
    /// Candidate order comes from the package-manager descriptor and is the
    /// tie-break: first match wins, no scoring.
    pub fn locate<P: AsRef<Path>>(project_path: P, candidates: &[&str]) -> Option<String> {
        let project_path = project_path.as_ref();
        candidates
            .iter()
            .find(|name| project_path.join(name).is_file())
            .map(|name| name.to_string())
    }
}
