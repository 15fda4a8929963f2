//! CLI Doctor Command
//!
//! Checks the local setup before the first consultation.

use std::path::Path;

use expertdesk_config::{validate, ExpertDeskConfig};
use expertdesk_personas::descriptors;

#[derive(Debug, PartialEq, Eq)]
enum Check {
    Ok(String),
    Warn(String),
    Fail(String),
}

impl Check {
    fn print(&self) {
        match self {
            Check::Ok(msg) => println!("  🟢 {msg}"),
            Check::Warn(msg) => println!("  🟡 {msg}"),
            Check::Fail(msg) => println!("  🔴 {msg}"),
        }
    }

    fn failed(&self) -> bool {
        matches!(self, Check::Fail(_))
    }
}

/// Executes the full doctor diagnosis. Returns whether every check passed.
pub fn run(config: &ExpertDeskConfig, config_path: &Path) -> bool {
    println!("\n🔍 Running ExpertDesk Doctor...\n");

    let checks = collect(config, config_path);
    for check in &checks {
        check.print();
    }

    let is_ok = !checks.iter().any(Check::failed);
    println!();
    if is_ok {
        println!("✅ All checks passed! ExpertDesk is ready.");
    } else {
        println!("❌ Some checks failed! Please fix the errors above.");
    }
    is_ok
}

fn collect(config: &ExpertDeskConfig, config_path: &Path) -> Vec<Check> {
    let mut checks = Vec::new();

    if config_path.exists() {
        checks.push(Check::Ok(format!("Config file: {}", config_path.display())));
    } else {
        checks.push(Check::Warn(format!(
            "No config file at {} (using defaults)",
            config_path.display()
        )));
    }

    let report = validate(config);
    for error in &report.errors {
        checks.push(Check::Fail(format!("{}: {}", error.path, error.message)));
    }

    match config.openai.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => checks.push(Check::Ok("OPENAI_API_KEY is set".into())),
        _ => checks.push(Check::Fail(
            "OPENAI_API_KEY is missing (set it in the environment or .env)".into(),
        )),
    }

    checks.push(Check::Ok(format!(
        "Model {} at {} (temperature {})",
        config.openai.model, config.openai.base_url, config.openai.temperature
    )));

    if let Some(dir) = &config.logging.dir {
        match std::fs::create_dir_all(dir) {
            Ok(()) => checks.push(Check::Ok(format!("Log directory: {dir}"))),
            Err(e) => checks.push(Check::Fail(format!("Log directory {dir}: {e}"))),
        }
    }

    checks.push(Check::Ok(format!("{} personas available", descriptors().len())));
    checks
}
