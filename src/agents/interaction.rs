use crate::error::{NuxupError, Result};
use colored::Colorize;
use std::io::{self, Write};

/// Decision source for interactive prompts.
///
/// The console implementation reads stdin; tests substitute a scripted
/// implementation so runs stay deterministic.
pub trait Prompter {
    /// Ask a yes/no question; an empty answer takes the default.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    /// Pick one of `options`; an empty answer takes the default index.
    fn select(&mut self, message: &str, options: &[String], default: usize) -> Result<usize>;
}

/// Prompter backed by the terminal.
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };

        loop {
            print!("{} {} ", message.bold(), hint.dimmed());
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            let answer = input.trim().to_lowercase();

            match answer.as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                "q" | "quit" => return Err(NuxupError::UserCancelled),
                _ => {
                    println!("{}", "Please answer with y(es), n(o), or q(uit).".red());
                }
            }
        }
    }

    fn select(&mut self, message: &str, options: &[String], default: usize) -> Result<usize> {
        println!("{}", message.bold());
        for (idx, option) in options.iter().enumerate() {
            if idx == default {
                println!("  {:>2}) {} {}", idx + 1, option.green(), "(default)".dimmed());
            } else {
                println!("  {:>2}) {}", idx + 1, option.green());
            }
        }

        loop {
            print!("Select [1-{}] (or 'q' to cancel): ", options.len());
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            let trimmed = input.trim();

            if trimmed.is_empty() {
                return Ok(default);
            }
            if trimmed.eq_ignore_ascii_case("q") {
                return Err(NuxupError::UserCancelled);
            }
            if let Ok(choice) = trimmed.parse::<usize>() {
                if choice >= 1 && choice <= options.len() {
                    return Ok(choice - 1);
                }
            }

            println!("{}", "Invalid selection. Please try again.".red());
        }
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::Prompter;
    use crate::error::Result;

    /// Deterministic prompter for tests: pops pre-scripted answers and falls
    /// back to the prompt default once the script runs out.
    pub struct ScriptedPrompter {
        confirms: Vec<bool>,
        selections: Vec<usize>,
    }

    impl ScriptedPrompter {
        pub fn new(confirms: Vec<bool>, selections: Vec<usize>) -> Self {
            Self {
                confirms,
                selections,
            }
        }

        pub fn with_defaults() -> Self {
            Self::new(Vec::new(), Vec::new())
        }
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&mut self, _message: &str, default: bool) -> Result<bool> {
            if self.confirms.is_empty() {
                Ok(default)
            } else {
                Ok(self.confirms.remove(0))
            }
        }

        fn select(&mut self, _message: &str, _options: &[String], default: usize) -> Result<usize> {
            if self.selections.is_empty() {
                Ok(default)
            } else {
                Ok(self.selections.remove(0))
            }
        }
    }
}
