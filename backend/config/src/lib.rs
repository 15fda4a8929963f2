//! `expertdesk-config` — ExpertDesk runtime configuration.
//!
//! Provides:
//! - Typed config schema (provider, logging, HTTP server)
//! - YAML read/write
//! - `${ENV_VAR}` substitution and environment overrides
//! - Validation with field paths
//! - Redaction for safe display

pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use env::{apply_env_overrides, process_env, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_raw_config, write_config};
pub use redact::{redact, redacted_config};
pub use schema::{ExpertDeskConfig, LoggingConfig, OpenAiConfig, ServerConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Load the config file, substitute env vars, and apply env overrides.
///
/// `path` falls back to `<config_dir>/config.yaml`; a missing file means defaults.
/// The result is not validated.
pub async fn load(path: Option<&Path>, env: &HashMap<String, String>) -> Result<ExpertDeskConfig> {
    let default_path = config_file_path(&config_dir(env));
    let path = path.unwrap_or(&default_path);

    let mut config = match load_raw_config(path).await? {
        Some(raw) => {
            let value = resolve_env_vars_with(&raw, env)
                .context("Failed to resolve env vars in config")?;
            serde_json::from_value(value).context("Failed to deserialize config")?
        }
        None => ExpertDeskConfig::default(),
    };

    apply_env_overrides(&mut config, env);
    Ok(config)
}

/// [`load`], then validate. Warnings are logged; any error fails the load.
pub async fn load_and_prepare(
    path: Option<&Path>,
    env: &HashMap<String, String>,
) -> Result<ExpertDeskConfig> {
    let config = load(path, env).await?;

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if !report.is_valid() {
        let details: Vec<String> = report.errors.iter().map(|e| e.to_string()).collect();
        bail!("Invalid configuration:\n  {}", details.join("\n  "));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn write_temp(contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("expertdesk-load-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_env_overrides_file() {
        let path = write_temp("openai:\n  apiKey: ${FILE_KEY}\n  model: gpt-4o\n");
        let env = HashMap::from([
            ("FILE_KEY".to_string(), "sk-from-file".to_string()),
            ("EXPERTDESK_MODEL".to_string(), "gpt-4o-mini".to_string()),
        ]);

        let config = load_and_prepare(Some(&path), &env).await.unwrap();
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-from-file"));
        assert_eq!(config.openai.model, "gpt-4o-mini");

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults_plus_env() {
        let dir = std::env::temp_dir().join(format!("expertdesk-none-{}", uuid::Uuid::new_v4()));
        let env = HashMap::from([
            ("EXPERTDESK_CONFIG_DIR".to_string(), dir.display().to_string()),
            ("OPENAI_API_KEY".to_string(), "sk-env".to_string()),
        ]);

        let config = load_and_prepare(None, &env).await.unwrap();
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.openai.temperature, 0.5);
    }

    #[tokio::test]
    async fn test_invalid_values_are_rejected() {
        let path = write_temp("openai:\n  temperature: 3.0\n");
        let err = load_and_prepare(Some(&path), &HashMap::new()).await.unwrap_err();
        assert!(err.to_string().contains("openai.temperature"));

        // Plain load leaves judgement to the caller.
        let config = load(Some(&path), &HashMap::new()).await.unwrap();
        assert_eq!(config.openai.temperature, 3.0);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_unresolved_reference_fails() {
        let path = write_temp("openai:\n  apiKey: ${NOT_SET_ANYWHERE}\n");
        let err = load_and_prepare(Some(&path), &HashMap::new()).await.unwrap_err();
        assert!(format!("{err:#}").contains("NOT_SET_ANYWHERE"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
