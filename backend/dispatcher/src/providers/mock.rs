use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use expertdesk_core::{CompletionProvider, CompletionRequest, CompletionResponse, Role};

enum Behavior {
    Fixed(String),
    Echo,
    Fail(String),
}

/// A mock completion provider with canned behavior that records every request.
pub struct MockProvider {
    name: String,
    behavior: Behavior,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            behavior: Behavior::Fixed("Mock response".to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.behavior = Behavior::Fixed(response.into());
        self
    }

    /// Reply with the content of the last user message.
    pub fn echoing(mut self) -> Self {
        self.behavior = Behavior::Echo;
        self
    }

    pub fn failing(mut self, error: impl Into<String>) -> Self {
        self.behavior = Behavior::Fail(error.into());
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let content = match &self.behavior {
            Behavior::Fixed(text) => text.clone(),
            Behavior::Echo => request
                .messages
                .iter()
                .rev()
                .find(|m| m.role == Role::User)
                .map(|m| m.content.clone())
                .unwrap_or_default(),
            Behavior::Fail(error) => anyhow::bail!("{error}"),
        };

        Ok(CompletionResponse {
            content,
            provider: self.name.clone(),
            model: request.model.clone(),
            tokens_used: 0,
            latency_ms: 0,
        })
    }
}
