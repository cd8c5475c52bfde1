use thiserror::Error;

#[derive(Error, Debug)]
pub enum NuxupError {
    #[error("Project validation failed: {0}")]
    ProjectValidation(String),

    #[error("Unable to detect a package manager: {0}")]
    PackageManagerDetection(String),

    #[error("Install failed: {0}")]
    Install(String),

    #[error("Force reset failed: {0}")]
    ForceReset(String),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NuxupError>;
