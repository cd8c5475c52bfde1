pub mod channel;
pub mod cleanup;
pub mod force_reset;
pub mod installer;
pub mod interaction;
pub mod lockfile;
pub mod manifest;
pub mod package_manager;
pub mod report;

pub use channel::{Channel, ChannelResolver};
pub use cleanup::BuildArtifactCleaner;
pub use force_reset::{ForceResetController, ResetTargets};
pub use installer::{Installer, PackageManagerInstaller};
pub use interaction::{ConsolePrompter, Prompter};
pub use lockfile::LockFileLocator;
pub use manifest::{DependencyClass, ManifestSnapshot, classify, installed_version};
pub use package_manager::{PackageManager, PackageManagerProbe};
pub use report::{UpgradeOutcome, UpgradeReport, VersionDiffReporter};
