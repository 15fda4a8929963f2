//! Config redaction: produce safe-to-display config snapshots by masking secrets.

use serde_json::Value;

use crate::schema::ExpertDeskConfig;

/// Keys whose string values are secrets.
static SENSITIVE_KEYS: &[&str] = &["apiKey", "api_key", "token", "secret", "password"];

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Redact a config JSON value, masking all sensitive fields.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

/// Serialize the typed config and redact it.
pub fn redacted_config(config: &ExpertDeskConfig) -> Value {
    redact(&serde_json::to_value(config).unwrap_or(Value::Null))
}

fn redact_string(s: &str, key: &str) -> Value {
    if !is_sensitive_key(key) || s.is_empty() {
        return Value::String(s.to_string());
    }
    // Show a short prefix so users can tell which key is loaded.
    let hint = if s.chars().count() > 8 {
        format!("{}***", s.chars().take(4).collect::<String>())
    } else {
        "***".to_string()
    };
    Value::String(hint)
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) => redact_string(s, key),
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_recursive(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}
