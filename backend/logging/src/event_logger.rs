//! Consultation Event Logger
//!
//! Structured events (submitted, answered, failed, feedback) emitted through
//! `tracing` under the `consultation_events` target, so a JSON file layer
//! turns them into NDJSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsultationEvent {
    Submitted {
        persona: String,
        question: String,
    },
    Answered {
        persona: String,
        provider: String,
        answer_chars: usize,
        tokens_used: u64,
        latency_ms: u64,
    },
    Failed {
        persona: String,
        kind: String,
        error_msg: String,
    },
    Feedback {
        persona: String,
        rating: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: ConsultationEvent,
}

impl EventLogEntry {
    /// Build an entry with all free-text fields redacted.
    pub fn new(session_id: &str, mut event: ConsultationEvent) -> Self {
        match &mut event {
            ConsultationEvent::Submitted { question, .. } => {
                *question = redact_sensitive_data(question);
            }
            ConsultationEvent::Failed { error_msg, .. } => {
                *error_msg = redact_sensitive_data(error_msg);
            }
            ConsultationEvent::Answered { .. } | ConsultationEvent::Feedback { .. } => {}
        }

        Self {
            session_id: session_id.to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}

pub struct EventLogger;

impl EventLogger {
    /// Redact and emit a consultation event.
    pub fn log_event(session_id: &str, event: ConsultationEvent) {
        let entry = EventLogEntry::new(session_id, event);
        let payload = serde_json::to_string(&entry).unwrap_or_default();
        info!(target: "consultation_events", event = %payload, "Consultation event");
    }
}
