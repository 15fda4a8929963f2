//! Environment handling for config values.
//!
//! Two passes run at load time:
//! - `${VAR_NAME}` references inside string values of the config file are
//!   substituted (uppercase `[A-Z_][A-Z0-9_]*` names only; `$${VAR}` escapes
//!   to a literal `${VAR}`),
//! - well-known variables (`OPENAI_API_KEY`, `EXPERTDESK_PORT`, ...) override
//!   the corresponding typed fields.

use std::collections::HashMap;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use tracing::warn;

use crate::schema::ExpertDeskConfig;

/// Matches `${NAME}` and the escaped form `$${NAME}`.
static ENV_REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const EXPERTDESK_MODEL: &str = "EXPERTDESK_MODEL";
pub const EXPERTDESK_TEMPERATURE: &str = "EXPERTDESK_TEMPERATURE";
pub const EXPERTDESK_BIND: &str = "EXPERTDESK_BIND";
pub const EXPERTDESK_PORT: &str = "EXPERTDESK_PORT";
pub const EXPERTDESK_LOG_LEVEL: &str = "EXPERTDESK_LOG_LEVEL";
pub const EXPERTDESK_LOG_DIR: &str = "EXPERTDESK_LOG_DIR";
pub const EXPERTDESK_CONFIG_DIR: &str = "EXPERTDESK_CONFIG_DIR";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Snapshot of the current process environment.
pub fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Substitute `${VAR}` references in a config JSON value tree.
///
/// Only string leaves are processed. A referenced variable that is unset or
/// empty is an error.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    Ok(substitute_value(value, env, "")?)
}

fn substitute_value(
    value: &Value,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<Value, MissingEnvVarError> {
    match value {
        Value::String(s) => substitute_string(s, env, path).map(Value::String),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(
    s: &str,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<String, MissingEnvVarError> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let replaced = ENV_REF_PATTERN.replace_all(s, |caps: &Captures| {
        let name = &caps[1];
        if caps[0].starts_with("$$") {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    match missing {
        Some(err) => Err(err),
        None => Ok(replaced.into_owned()),
    }
}

/// Apply well-known environment variables on top of the file config.
pub fn apply_env_overrides(config: &mut ExpertDeskConfig, env: &HashMap<String, String>) {
    let get = |name: &str| env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(key) = get(OPENAI_API_KEY) {
        config.openai.api_key = Some(key.to_string());
    }
    if let Some(url) = get(OPENAI_BASE_URL) {
        config.openai.base_url = url.to_string();
    }
    if let Some(model) = get(EXPERTDESK_MODEL) {
        config.openai.model = model.to_string();
    }
    if let Some(raw) = get(EXPERTDESK_TEMPERATURE) {
        match raw.parse() {
            Ok(t) => config.openai.temperature = t,
            Err(_) => warn!(var = EXPERTDESK_TEMPERATURE, value = %raw, "Ignoring unparsable value"),
        }
    }
    if let Some(bind) = get(EXPERTDESK_BIND) {
        config.server.bind = bind.to_string();
    }
    if let Some(raw) = get(EXPERTDESK_PORT) {
        match raw.parse() {
            Ok(p) => config.server.port = p,
            Err(_) => warn!(var = EXPERTDESK_PORT, value = %raw, "Ignoring unparsable value"),
        }
    }
    if let Some(level) = get(EXPERTDESK_LOG_LEVEL) {
        config.logging.level = level.to_string();
    }
    if let Some(dir) = get(EXPERTDESK_LOG_DIR) {
        config.logging.dir = Some(dir.to_string());
    }
}
