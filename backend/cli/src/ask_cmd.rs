//! `expertdesk ask`: one consultation, answer on stdout.

use expertdesk_core::ConsultationRequest;
use expertdesk_dispatcher::Dispatcher;
use expertdesk_personas::{disclaimer_text, resolve_alias, Persona};

use crate::terminal_output::{dim, note_error, note_warn};

const EMPTY_INPUT_WARNING: &str = "質問を入力してください。";

/// Returns whether an answer was produced.
pub async fn run(dispatcher: &Dispatcher, persona: &str, text: &str) -> bool {
    if text.trim().is_empty() {
        note_warn(EMPTY_INPUT_WARNING);
        return false;
    }

    eprintln!("{}", dim(&disclaimer_text()));
    if let Ok(p) = persona.parse::<Persona>() {
        eprintln!("{}", dim(&p.working_message()));
    }

    let result = dispatcher
        .dispatch(&ConsultationRequest::new(resolve_alias(persona), text))
        .await;
    match result.into_result() {
        Ok(answer) => {
            println!("{answer}");
            true
        }
        Err(message) => {
            note_error(&message);
            false
        }
    }
}
