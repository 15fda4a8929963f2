//! `expertdesk config` subcommands.

use std::path::Path;

use anyhow::{bail, Result};
use clap::Subcommand;

use expertdesk_config::{redacted_config, validate, write_config, ExpertDeskConfig, ValidationReport};

use crate::terminal_output::{note_error, note_success, note_warn};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration with secrets masked
    Show,
    /// Check the effective configuration and list problems
    Validate,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file location
    Path,
}

pub async fn run(cmd: ConfigCommands, config: &ExpertDeskConfig, path: &Path) -> Result<bool> {
    match cmd {
        ConfigCommands::Show => {
            println!("{}", serde_json::to_string_pretty(&redacted_config(config))?);
        }
        ConfigCommands::Validate => {
            let report = validate(config);
            print_report(&report);
            return Ok(report.is_valid());
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            write_config(&ExpertDeskConfig::default(), path).await?;
            note_success(&format!("Wrote {}", path.display()));
            note_warn("Set OPENAI_API_KEY in the environment or a .env file");
        }
        ConfigCommands::Path => println!("{}", path.display()),
    }
    Ok(true)
}

fn print_report(report: &ValidationReport) {
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }
    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    if report.is_valid() {
        note_success("Configuration is valid");
    }
}
