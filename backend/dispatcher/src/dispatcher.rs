use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use expertdesk_core::{
    ApiKey, ChatMessage, CompletionProvider, CompletionRequest, ConsultError,
    ConsultationRequest, ConsultationResult,
};
use expertdesk_logging::{ConsultationEvent, EventLogger};
use expertdesk_personas::lookup;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Explicit settings the dispatcher needs; nothing is read from the process environment.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub api_key: Option<ApiKey>,
    pub model: String,
    pub temperature: f32,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl DispatcherConfig {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(ApiKey::new(key));
        self
    }

    /// The configured credential, if present and non-blank.
    fn credential(&self) -> Option<ApiKey> {
        self.api_key
            .as_ref()
            .map(|k| k.expose().trim())
            .filter(|k| !k.is_empty())
            .map(ApiKey::new)
    }
}

/// Resolves a persona and forwards one system+user exchange to the provider.
///
/// Every call is independent: no retries, no caching, no shared request state.
/// Failures of any kind come back as `ConsultationResult::Failure`.
pub struct Dispatcher {
    config: DispatcherConfig,
    provider: Arc<dyn CompletionProvider>,
    session_id: String,
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            config,
            provider,
            session_id: "default".to_string(),
        }
    }

    /// Tag consultation events with a front-end session id.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn dispatch(&self, request: &ConsultationRequest) -> ConsultationResult {
        match self.try_dispatch(request).await {
            Ok(text) => ConsultationResult::Success { text },
            Err(err) => {
                warn!(
                    persona = %request.persona_id,
                    kind = %err.kind(),
                    "Consultation failed"
                );
                EventLogger::log_event(
                    &self.session_id,
                    ConsultationEvent::Failed {
                        persona: request.persona_id.clone(),
                        kind: err.kind().to_string(),
                        error_msg: err.to_string(),
                    },
                );
                err.into()
            }
        }
    }

    /// Answer text, or the human-readable error to show in its place.
    pub async fn consult(&self, persona_id: &str, user_text: &str) -> Result<String, String> {
        self.dispatch(&ConsultationRequest::new(persona_id, user_text))
            .await
            .into_result()
    }

    async fn try_dispatch(&self, request: &ConsultationRequest) -> Result<String, ConsultError> {
        let question = request.user_text.trim();
        if question.is_empty() {
            return Err(ConsultError::EmptyInput);
        }

        let persona = lookup(&request.persona_id)?;
        let api_key = self.config.credential().ok_or(ConsultError::MissingCredential)?;

        EventLogger::log_event(
            &self.session_id,
            ConsultationEvent::Submitted {
                persona: persona.id.to_string(),
                question: question.to_string(),
            },
        );

        let completion = CompletionRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            messages: vec![
                ChatMessage::system(persona.system_prompt),
                ChatMessage::user(question),
            ],
            api_key,
        };

        debug!(
            provider = %self.provider.name(),
            persona = %persona.id,
            model = %completion.model,
            "Dispatching consultation"
        );

        let start = Instant::now();
        let response = self.provider.complete(&completion).await?;

        info!(
            provider = %response.provider,
            persona = %persona.id,
            tokens = response.tokens_used,
            latency_ms = start.elapsed().as_millis() as u64,
            "Consultation answered"
        );
        EventLogger::log_event(
            &self.session_id,
            ConsultationEvent::Answered {
                persona: persona.id.to_string(),
                provider: response.provider.clone(),
                answer_chars: response.content.chars().count(),
                tokens_used: response.tokens_used,
                latency_ms: response.latency_ms,
            },
        );

        Ok(response.content)
    }
}
