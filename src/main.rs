mod agents;
mod cli;
mod error;
mod nuxt;
mod utils;
mod workflow;

use clap::Parser;
use cli::Cli;
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        unsafe {
            std::env::set_var("NUXUP_VERBOSE", "1");
        }
    }

    let (project_dir, deprecated) = cli.project_dir();
    if deprecated {
        println!(
            "{}",
            "Warning: --rootDir is deprecated, use --cwd instead".yellow()
        );
    }

    let result = workflow::execute_upgrade(project_dir, cli.force_flag(), cli.channel);

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
