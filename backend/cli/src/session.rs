//! Front-end session state: the last consultation and feedback on it.

use anyhow::{bail, Result};
use uuid::Uuid;

use expertdesk_core::{Consultation, ConsultationResult, FeedbackRating};
use expertdesk_logging::{ConsultationEvent, EventLogger};
use expertdesk_personas::Persona;

pub const FEEDBACK_THANKS: &str = "フィードバックをありがとうございます！";

pub struct Session {
    id: String,
    last: Option<Consultation>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            last: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn record(&mut self, persona: Persona, question: &str, result: ConsultationResult) {
        self.last = Some(Consultation::new(persona.id(), question, result));
    }

    pub fn last(&self) -> Option<&Consultation> {
        self.last.as_ref()
    }

    /// Rate the last consultation.
    pub fn feedback(&self, rating: FeedbackRating) -> Result<&'static str> {
        let Some(last) = &self.last else {
            bail!("no consultation to rate yet");
        };
        EventLogger::log_event(
            &self.id,
            ConsultationEvent::Feedback {
                persona: last.persona.clone(),
                rating: rating.key().to_string(),
            },
        );
        Ok(FEEDBACK_THANKS)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_requires_a_consultation() {
        let mut session = Session::new();
        assert!(session.feedback(FeedbackRating::Helpful).is_err());

        session.record(
            Persona::RecipeAdvisor,
            "卵焼きのコツは？",
            ConsultationResult::Success { text: "弱火で".into() },
        );
        assert_eq!(session.feedback(FeedbackRating::Helpful).unwrap(), FEEDBACK_THANKS);
    }

    #[test]
    fn test_record_replaces_last() {
        let mut session = Session::new();
        session.record(Persona::HealthAdvisor, "q1", ConsultationResult::Success { text: "a1".into() });
        session.record(Persona::TravelPlanner, "q2", ConsultationResult::Success { text: "a2".into() });

        let last = session.last().unwrap();
        assert_eq!(last.persona, "旅行プランナー");
        assert_eq!(last.question, "q2");
        assert_eq!(last.result.display_text(), "a2");
    }
}
