use crate::agents::channel::Channel;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "nuxup",
    about = "Upgrade Nuxt and its companion packages to the latest stable or nightly release",
    version,
    author
)]
pub struct Cli {
    /// Path to the project directory (defaults to current directory)
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub cwd: String,

    /// Deprecated alias for --cwd
    #[arg(long = "rootDir", value_name = "PATH", hide = true)]
    pub root_dir: Option<String>,

    /// Remove node_modules and the lock file before installing
    #[arg(long, overrides_with = "no_force")]
    pub force: bool,

    /// Keep node_modules and the lock file in place
    #[arg(long, overrides_with = "force")]
    pub no_force: bool,

    /// Release channel to install
    #[arg(long, value_enum, default_value_t = Channel::Stable)]
    pub channel: Channel,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Explicit force choice, if either flag was passed.
    ///
    /// `None` means neither flag was given and the workflow should ask.
    pub fn force_flag(&self) -> Option<bool> {
        if self.force {
            Some(true)
        } else if self.no_force {
            Some(false)
        } else {
            None
        }
    }

    /// Project directory, honoring the deprecated --rootDir spelling.
    ///
    /// Returns the directory plus whether the deprecated flag supplied it.
    pub fn project_dir(&self) -> (&str, bool) {
        if self.cwd == "." {
            if let Some(dir) = self.root_dir.as_deref() {
                return (dir, true);
            }
        }
        (&self.cwd, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_flag_defaults_to_none() {
        let cli = Cli::parse_from(["nuxup"]);
        assert_eq!(cli.force_flag(), None);
    }

    #[test]
    fn force_flag_reflects_explicit_flags() {
        let cli = Cli::parse_from(["nuxup", "--force"]);
        assert_eq!(cli.force_flag(), Some(true));

        let cli = Cli::parse_from(["nuxup", "--no-force"]);
        assert_eq!(cli.force_flag(), Some(false));
    }

    #[test]
    fn later_force_flag_wins() {
        let cli = Cli::parse_from(["nuxup", "--force", "--no-force"]);
        assert_eq!(cli.force_flag(), Some(false));
    }

    #[test]
    fn root_dir_is_accepted_as_fallback() {
        let cli = Cli::parse_from(["nuxup", "--rootDir", "/tmp/app"]);
        assert_eq!(cli.project_dir(), ("/tmp/app", true));
    }

    #[test]
    fn cwd_takes_precedence_over_root_dir() {
        let cli = Cli::parse_from(["nuxup", "--cwd", "/srv/app", "--rootDir", "/tmp/app"]);
        assert_eq!(cli.project_dir(), ("/srv/app", false));
    }

    #[test]
    fn channel_defaults_to_stable() {
        let cli = Cli::parse_from(["nuxup"]);
        assert_eq!(cli.channel, Channel::Stable);

        let cli = Cli::parse_from(["nuxup", "--channel", "nightly"]);
        assert_eq!(cli.channel, Channel::Nightly);
    }
}
