//! CLI Status Command
//!
//! Asks a running `expertdesk serve` for its health report.

use std::net::IpAddr;

use anyhow::{Context, Result};
use serde_json::Value;

pub fn health_url(bind: &str, port: u16) -> String {
    // A wildcard bind is reachable through loopback.
    let host = match bind.trim_matches(['[', ']']) {
        "0.0.0.0" | "::" | "" => "127.0.0.1".to_string(),
        other => match other.parse::<IpAddr>() {
            Ok(IpAddr::V6(v6)) => format!("[{v6}]"),
            _ => other.to_string(),
        },
    };
    format!("http://{host}:{port}/api/health")
}

pub async fn fetch_health(url: &str) -> Result<Value> {
    let resp = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to reach {url}"))?
        .error_for_status()?;
    Ok(resp.json().await?)
}

/// Returns whether a server answered.
pub async fn run(bind: &str, port: u16) -> Result<bool> {
    println!("ExpertDesk status: checking...");
    let url = health_url(bind, port);
    match fetch_health(&url).await {
        Ok(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(true)
        }
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "Health check failed");
            println!("ExpertDesk is not running on port {port}");
            Ok(false)
        }
    }
}
