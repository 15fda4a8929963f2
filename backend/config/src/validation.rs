//! Config validation with user-friendly error messages.

use thiserror::Error;

use crate::schema::ExpertDeskConfig;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &ExpertDeskConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_openai(config, &mut report);
    validate_logging(config, &mut report);
    validate_server(config, &mut report);
    report
}

fn validate_openai(config: &ExpertDeskConfig, report: &mut ValidationReport) {
    let openai = &config.openai;
    if openai.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
        report.warn(
            "openai.apiKey",
            "No API key configured; every consultation will fail until OPENAI_API_KEY is set",
        );
    }
    if openai.model.trim().is_empty() {
        report.error("openai.model", "Model id cannot be empty");
    }
    if !(0.0..=2.0).contains(&openai.temperature) {
        report.error(
            "openai.temperature",
            format!("Temperature {} is outside 0.0..=2.0", openai.temperature),
        );
    }
    if !(openai.base_url.starts_with("http://") || openai.base_url.starts_with("https://")) {
        report.error("openai.baseUrl", "Base URL must start with http:// or https://");
    } else if openai.base_url.starts_with("http://")
        && !openai.base_url.contains("localhost")
        && !openai.base_url.contains("127.0.0.1")
    {
        report.warn("openai.baseUrl", "API key will be sent over plain HTTP");
    }
}

fn validate_logging(config: &ExpertDeskConfig, report: &mut ValidationReport) {
    const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
    let level = config.logging.level.to_ascii_lowercase();
    // Directive strings like "expertdesk=debug,info" are passed through as-is.
    if !level.contains('=') && !LEVELS.contains(&level.as_str()) {
        report.error(
            "logging.level",
            format!("Unknown log level '{}'", config.logging.level),
        );
    }
}

fn validate_server(config: &ExpertDeskConfig, report: &mut ValidationReport) {
    let server = &config.server;
    if server.bind.trim().is_empty() {
        report.error("server.bind", "Bind address cannot be empty");
    }
    if server.port == 0 {
        report.error("server.port", "Port must be > 0");
    } else if server.port < 1024 && server.port != 80 && server.port != 443 {
        report.warn(
            "server.port",
            format!(
                "Port {} requires elevated privileges; consider using a port >= 1024",
                server.port
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> ExpertDeskConfig {
        let mut config = ExpertDeskConfig::default();
        config.openai.api_key = Some("sk-test".into());
        config
    }

    #[test]
    fn default_config_only_warns_about_key() {
        let report = validate(&ExpertDeskConfig::default());
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].path, "openai.apiKey");
    }

    #[test]
    fn configured_default_is_clean() {
        let report = validate(&configured());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn temperature_out_of_range() {
        let mut config = configured();
        config.openai.temperature = 2.5;
        let report = validate(&config);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "openai.temperature");
    }

    #[test]
    fn bad_base_url_and_port() {
        let mut config = configured();
        config.openai.base_url = "api.openai.com".into();
        config.server.port = 0;
        let report = validate(&config);
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["openai.baseUrl", "server.port"]);
    }

    #[test]
    fn log_level_directives_pass() {
        let mut config = configured();
        config.logging.level = "expertdesk_dispatcher=debug,info".into();
        assert!(validate(&config).is_valid());
        config.logging.level = "loud".into();
        assert!(!validate(&config).is_valid());
    }
}
