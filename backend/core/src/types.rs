use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConsultError, ErrorKind};

/// A single user submission: which persona to ask, and what.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationRequest {
    pub persona_id: String,
    pub user_text: String,
}

impl ConsultationRequest {
    pub fn new(persona_id: impl Into<String>, user_text: impl Into<String>) -> Self {
        Self {
            persona_id: persona_id.into(),
            user_text: user_text.into(),
        }
    }
}

/// Outcome of a dispatch. Failures carry a user-facing message in `detail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConsultationResult {
    Success { text: String },
    Failure { kind: ErrorKind, detail: String },
}

impl ConsultationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ConsultationResult::Success { .. })
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            ConsultationResult::Success { .. } => None,
            ConsultationResult::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Text to show the user: the answer, or the error message in its place.
    pub fn display_text(&self) -> &str {
        match self {
            ConsultationResult::Success { text } => text,
            ConsultationResult::Failure { detail, .. } => detail,
        }
    }

    pub fn into_result(self) -> Result<String, String> {
        match self {
            ConsultationResult::Success { text } => Ok(text),
            ConsultationResult::Failure { detail, .. } => Err(detail),
        }
    }
}

impl From<ConsultError> for ConsultationResult {
    fn from(err: ConsultError) -> Self {
        ConsultationResult::Failure {
            kind: err.kind(),
            detail: err.to_string(),
        }
    }
}

/// The most recent question/answer pair, kept for redisplay by front-ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub persona: String,
    pub question: String,
    pub result: ConsultationResult,
    pub at: DateTime<Utc>,
}

impl Consultation {
    pub fn new(persona: impl Into<String>, question: impl Into<String>, result: ConsultationResult) -> Self {
        Self {
            persona: persona.into(),
            question: question.into(),
            result,
            at: Utc::now(),
        }
    }
}

/// "Was this answer helpful?" rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackRating {
    VeryHelpful,
    Helpful,
    Neutral,
    NotHelpful,
}

impl FeedbackRating {
    pub const ALL: [FeedbackRating; 4] = [
        FeedbackRating::VeryHelpful,
        FeedbackRating::Helpful,
        FeedbackRating::Neutral,
        FeedbackRating::NotHelpful,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FeedbackRating::VeryHelpful => "very_helpful",
            FeedbackRating::Helpful => "helpful",
            FeedbackRating::Neutral => "neutral",
            FeedbackRating::NotHelpful => "not_helpful",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedbackRating::VeryHelpful => "とても役に立った",
            FeedbackRating::Helpful => "役に立った",
            FeedbackRating::Neutral => "普通",
            FeedbackRating::NotHelpful => "役に立たなかった",
        }
    }
}

impl fmt::Display for FeedbackRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FeedbackRating {
    type Err = String;

    /// Accepts the 1-based menu position, the snake_case name, or the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| format!("rating must be between 1 and {}", Self::ALL.len()));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.key() == s || r.label() == s)
            .ok_or_else(|| format!("unknown rating: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_from_error() {
        let result: ConsultationResult = ConsultError::MissingCredential.into();
        assert_eq!(result.error_kind(), Some(ErrorKind::MissingCredential));
        assert!(!result.is_success());
        assert!(result.display_text().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_result_serialization() {
        let ok = ConsultationResult::Success { text: "hi".into() };
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json, serde_json::json!({"status": "success", "text": "hi"}));

        let err: ConsultationResult = ConsultError::Provider("rate limited".into()).into();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["kind"], "provider_error");
    }

    #[test]
    fn test_into_result() {
        let ok = ConsultationResult::Success { text: "answer".into() };
        assert_eq!(ok.into_result(), Ok("answer".to_string()));
        let err: ConsultationResult = ConsultError::EmptyInput.into();
        assert!(err.into_result().is_err());
    }

    #[test]
    fn test_feedback_parsing() {
        assert_eq!("1".parse::<FeedbackRating>().unwrap(), FeedbackRating::VeryHelpful);
        assert_eq!("4".parse::<FeedbackRating>().unwrap(), FeedbackRating::NotHelpful);
        assert_eq!("neutral".parse::<FeedbackRating>().unwrap(), FeedbackRating::Neutral);
        assert_eq!("役に立った".parse::<FeedbackRating>().unwrap(), FeedbackRating::Helpful);
        assert!("0".parse::<FeedbackRating>().is_err());
        assert!("5".parse::<FeedbackRating>().is_err());
        assert!("great".parse::<FeedbackRating>().is_err());
    }
}
