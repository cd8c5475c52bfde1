use crate::nuxt::NUXT_REPO_URL;
use regex::Regex;
use url::Url;

/// Outcome of comparing pre- and post-upgrade versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// Post-upgrade version could not be read; nothing to report.
    Unknown,
    /// Pre- and post-upgrade labels are identical.
    UpToDate,
    /// Versions differ, or the previous one was unreadable.
    Upgraded,
}

/// Final report of an upgrade run.
#[derive(Debug, Clone)]
pub struct UpgradeReport {
    pub previous: Option<String>,
    pub updated: Option<String>,
    pub changelog_url: Option<String>,
    pub outcome: UpgradeOutcome,
}

/// VersionDiffReporter compares version labels and derives a changelog link.
pub struct VersionDiffReporter;

impl VersionDiffReporter {
    /// Compare two version labels.
    ///
    /// Comparison is exact string equality: two differently-formatted but
    /// semantically equal versions count as an upgrade.
    pub fn diff(previous: Option<&str>, updated: Option<&str>) -> UpgradeReport {
        let Some(updated) = updated else {
            return UpgradeReport {
                previous: previous.map(str::to_string),
                updated: None,
                changelog_url: None,
                outcome: UpgradeOutcome::Unknown,
            };
        };

        if previous == Some(updated) {
            return UpgradeReport {
                previous: previous.map(str::to_string),
                updated: Some(updated.to_string()),
                changelog_url: None,
                outcome: UpgradeOutcome::UpToDate,
            };
        }

        let changelog_url = previous.and_then(|prev| Self::changelog_url(prev, updated));

        UpgradeReport {
            previous: previous.map(str::to_string),
            updated: Some(updated.to_string()),
            changelog_url,
            outcome: UpgradeOutcome::Upgraded,
        }
    }

    /// Map a version label to the git identifier it was built from.
    ///
    /// Nightly builds carry a trailing `.<short-sha>` component (e.g.
    /// `3.10.0-28189609.d246d35`); stable releases map to their `v`-prefixed
    /// tag. Labels that are neither yield `None`.
    pub fn version_to_git_identifier(version: &str) -> Option<String> {
        if let Ok(hash_regex) = Regex::new(r"\.([0-9a-f]{7,8})$") {
            if let Some(captures) = hash_regex.captures(version) {
                return captures.get(1).map(|m| m.as_str().to_string());
            }
        }

        if semver::Version::parse(version).is_ok() {
            return Some(format!("v{version}"));
        }

        None
    }

    /// Compare link between two mappable version labels.
    fn changelog_url(previous: &str, updated: &str) -> Option<String> {
        let from = Self::version_to_git_identifier(previous)?;
        let to = Self::version_to_git_identifier(updated)?;

        Url::parse(&format!("{NUXT_REPO_URL}/compare/{from}...{to}"))
            .ok()
            .map(|url| url.to_string())
    }
}
