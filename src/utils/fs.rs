use crate::error::{NuxupError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Canonicalises and validates the project directory supplied on the CLI.
pub fn resolve_project_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();

    let canonical = path.canonicalize().map_err(|e| {
        NuxupError::ProjectValidation(format!("Invalid path '{}': {e}", path.display()))
    })?;

    if !canonical.is_dir() {
        return Err(NuxupError::ProjectValidation(format!(
            "Path '{}' is not a directory",
            canonical.display()
        )));
    }

    Ok(canonical)
}

/// Removes a file or directory tree, treating an absent path as a no-op.
pub fn remove_path_all(path: &Path) -> io::Result<()> {
    let metadata = match path.symlink_metadata() {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Creates an empty file, truncating any existing content.
pub fn touch(path: &Path) -> io::Result<()> {
    fs::File::create(path).map(|_| ())
}
