pub mod config_parser;

pub use config_parser::{NuxtConfig, NuxtConfigParser};

/// The package whose installed version this tool manages.
pub const PRIMARY_PACKAGE: &str = "nuxt";

/// Core packages upgraded alongside `nuxt` when the project declares them.
pub const COMPANION_PACKAGES: &[&str] = &[
    "@nuxt/kit",
    "@nuxt/schema",
    "@nuxt/rspack-builder",
    "@nuxt/vite-builder",
    "@nuxt/webpack-builder",
];

/// Upstream repository used for changelog comparison links.
pub const NUXT_REPO_URL: &str = "https://github.com/nuxt/nuxt";

/// Build output directory used when the project config cannot be read.
pub const DEFAULT_BUILD_DIR: &str = ".nuxt";
