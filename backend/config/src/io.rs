//! Config file location, read, and write.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info};

use crate::env::EXPERTDESK_CONFIG_DIR;
use crate::schema::ExpertDeskConfig;

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the config directory.
/// Priority: `EXPERTDESK_CONFIG_DIR` > `~/.expertdesk/` > `./.expertdesk/`
pub fn config_dir(env: &HashMap<String, String>) -> PathBuf {
    if let Some(dir) = env.get(EXPERTDESK_CONFIG_DIR).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".expertdesk"),
        None => PathBuf::from(".expertdesk"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Read the config file as an untyped JSON value tree.
///
/// Returns `Ok(None)` if the file doesn't exist (first run).
pub async fn load_raw_config(path: &Path) -> Result<Option<Value>> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty file parses as YAML null.
    let yaml: serde_yaml::Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;
    if yaml.is_null() {
        return Ok(None);
    }

    let value = serde_json::to_value(yaml)
        .with_context(|| format!("Config at {} is not a mapping", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(Some(value))
}

/// Write config to disk atomically (write to temp file, rename).
pub async fn write_config(config: &ExpertDeskConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    let tmp_path = path.with_extension("yaml.tmp");
    fs::write(&tmp_path, yaml.as_bytes())
        .await
        .with_context(|| format!("Failed to write temp config: {}", tmp_path.display()))?;

    fs::rename(&tmp_path, path).await.with_context(|| {
        format!("Failed to rename temp config to: {}", path.display())
    })?;

    info!(path = %path.display(), "Wrote config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("expertdesk-config-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_config_dir_env_override() {
        let env = HashMap::from([(EXPERTDESK_CONFIG_DIR.to_string(), "/etc/expertdesk".to_string())]);
        assert_eq!(config_dir(&env), PathBuf::from("/etc/expertdesk"));
        assert_eq!(
            config_file_path(&config_dir(&env)),
            PathBuf::from("/etc/expertdesk/config.yaml")
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let path = temp_path("config.yaml");
        assert!(load_raw_config(&path).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_load() {
        let path = temp_path("config.yaml");
        let mut config = ExpertDeskConfig::default();
        config.server.port = 9191;

        write_config(&config, &path).await.unwrap();
        let raw = load_raw_config(&path).await.unwrap().unwrap();
        assert_eq!(raw["server"]["port"], 9191);
        assert!(!path.with_extension("yaml.tmp").exists());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_invalid_yaml_is_an_error() {
        let path = temp_path("config.yaml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "openai: [unclosed").unwrap();

        let err = load_raw_config(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config YAML"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
