//! Telemetry and structured logging components for ExpertDesk.
//!
//! Handles log redaction, JSON file output with daily rotation, and
//! consultation event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{ConsultationEvent, EventLogEntry, EventLogger};
pub use logger::{build_filter, init_logger};
pub use redact::redact_sensitive_data;
