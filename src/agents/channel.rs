use crate::agents::interaction::Prompter;
use crate::error::Result;
use clap::ValueEnum;
use std::fmt;

/// Release channel to install from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Channel {
    /// Latest stable release
    Stable,
    /// Nightly builds published from the release branches
    Nightly,
}

/// Supported nightly release lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NightlyLine {
    V3,
    V4,
}

impl NightlyLine {
    pub fn label(&self) -> &'static str {
        match self {
            Self::V3 => "3.x",
            Self::V4 => "4.x",
        }
    }
}

impl fmt::Display for NightlyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Distribution tag published for each nightly line.
///
/// The 3.x nightlies are tagged `3x`; the 4.x line tracks the main branch and
/// publishes under `latest`. Adding a release line is a one-entry edit here.
const NIGHTLY_DIST_TAGS: &[(NightlyLine, &str)] = &[
    (NightlyLine::V3, "3x"),
    (NightlyLine::V4, "latest"),
];

/// Entry used when the user accepts the prompt default (the oldest supported
/// release line).
const DEFAULT_LINE_INDEX: usize = 0;

/// Concrete install target resolved from the requested channel.
#[derive(Debug, Clone)]
pub struct ChannelSelection {
    pub channel: Channel,
    pub nightly_line: Option<NightlyLine>,
    pub npm_packages: Vec<String>,
    pub version_label: String,
}

/// ChannelResolver maps a requested channel to the npm specifiers to install.
pub struct ChannelResolver;

impl ChannelResolver {
    /// Resolve install specifiers for `base_names` on the given channel.
    ///
    /// The output preserves the order and cardinality of `base_names`. The
    /// nightly channel asks the prompter which release line to follow; the
    /// stable channel never prompts.
    pub fn resolve(
        base_names: &[String],
        channel: Channel,
        prompter: &mut dyn Prompter,
    ) -> Result<ChannelSelection> {
        if channel != Channel::Nightly {
            return Ok(ChannelSelection {
                channel,
                nightly_line: None,
                npm_packages: base_names
                    .iter()
                    .map(|name| format!("{name}@latest"))
                    .collect(),
                version_label: "latest".to_string(),
            });
        }

        let options: Vec<String> = NIGHTLY_DIST_TAGS
            .iter()
            .map(|(line, _)| line.label().to_string())
            .collect();
        let choice = prompter.select(
            "Which nightly release line do you want to install?",
            &options,
            DEFAULT_LINE_INDEX,
        )?;
        let (line, dist_tag) = NIGHTLY_DIST_TAGS
            .get(choice)
            .copied()
            .unwrap_or(NIGHTLY_DIST_TAGS[DEFAULT_LINE_INDEX]);

        // Nightly builds ship as `<name>-nightly` installed under an alias of
        // the stable name, so the rest of the project resolves them normally.
        let npm_packages = base_names
            .iter()
            .map(|name| format!("{name}@npm:{name}-nightly@{dist_tag}"))
            .collect();

        Ok(ChannelSelection {
            channel,
            nightly_line: Some(line),
            npm_packages,
            version_label: line.label().to_string(),
        })
    }
}
