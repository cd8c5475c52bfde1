use crate::nuxt::DEFAULT_BUILD_DIR;
use colored::Colorize;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Nuxt project configuration, reduced to what the upgrade flow needs.
#[derive(Debug, Clone)]
pub struct NuxtConfig {
    pub build_dir: String,
}

/// Parser for Nuxt configuration files.
///
/// Nuxt configs are TypeScript/JavaScript modules, so this is a textual
/// scrape rather than a real evaluation. A missing or unreadable config falls
/// back to the defaults.
pub struct NuxtConfigParser {
    project_path: PathBuf,
}

const CONFIG_FILE_NAMES: &[&str] = &[
    "nuxt.config.ts",
    "nuxt.config.mts",
    "nuxt.config.js",
    "nuxt.config.mjs",
];

impl NuxtConfigParser {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Parse the project config; the first existing config file wins.
    pub fn parse(&self) -> NuxtConfig {
        for name in CONFIG_FILE_NAMES {
            let path = self.project_path.join(name);
            if !path.exists() {
                continue;
            }

            match fs::read_to_string(&path) {
                Ok(content) => {
                    let build_dir = Self::extract_build_dir(&content)
                        .unwrap_or_else(|| DEFAULT_BUILD_DIR.to_string());
                    return NuxtConfig { build_dir };
                }
                Err(e) => {
                    if std::env::var("NUXUP_VERBOSE").is_ok() {
                        println!("{}", format!("Could not read {}: {}", name, e).dimmed());
                    }
                }
            }
        }

        NuxtConfig {
            build_dir: DEFAULT_BUILD_DIR.to_string(),
        }
    }

    /// Extract a `buildDir: '...'` override from config source text.
    fn extract_build_dir(content: &str) -> Option<String> {
        let build_dir_regex = Regex::new(r#"buildDir\s*:\s*["']([^"']+)["']"#).ok()?;
        build_dir_regex
            .captures(content)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
    }
}
