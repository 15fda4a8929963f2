use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use expertdesk_core::{ConsultationRequest, ConsultationResult, ErrorKind, FeedbackRating};
use expertdesk_dispatcher::Dispatcher;
use expertdesk_personas::{descriptors, resolve_alias, Persona, DISCLAIMER, OVERVIEW};

use crate::session::Session;

/// Shared application state for API handlers.
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub session: RwLock<Session>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, session: Session) -> Self {
        Self {
            dispatcher,
            session: RwLock::new(session),
        }
    }
}

/// Build the Axum router with all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/about", get(about))
        .route("/api/personas", get(list_personas))
        .route("/api/consult", post(consult))
        .route("/api/last", get(last_consultation))
        .route("/api/feedback", post(feedback))
        .with_state(state)
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::EmptyInput | ErrorKind::UnknownPersona => StatusCode::BAD_REQUEST,
        ErrorKind::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::ProviderError => StatusCode::BAD_GATEWAY,
    }
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "expertdesk",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.dispatcher.provider_name(),
        "model": state.dispatcher.config().model,
    }))
}

async fn about() -> Json<Value> {
    Json(json!({
        "overview": OVERVIEW,
        "disclaimer": DISCLAIMER,
    }))
}

async fn list_personas() -> Json<Value> {
    let personas: Vec<Value> = descriptors()
        .iter()
        .map(|d| {
            json!({
                "id": d.id,
                "slug": d.slug,
                "icon": d.icon,
                "description": d.short_description,
            })
        })
        .collect();
    Json(json!({ "personas": personas, "disclaimer": DISCLAIMER }))
}

#[derive(Debug, Deserialize)]
struct ConsultBody {
    persona: String,
    #[serde(default)]
    text: String,
}

/// Run one consultation and remember it as the session's last.
async fn consult(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ConsultBody>,
) -> (StatusCode, Json<ConsultationResult>) {
    let result = state
        .dispatcher
        .dispatch(&ConsultationRequest::new(resolve_alias(&body.persona), &body.text))
        .await;

    if let Ok(persona) = body.persona.parse::<Persona>() {
        if result.error_kind() != Some(ErrorKind::EmptyInput) {
            state
                .session
                .write()
                .await
                .record(persona, body.text.trim(), result.clone());
        }
    }

    let status = result.error_kind().map_or(StatusCode::OK, status_for);
    (status, Json(result))
}

async fn last_consultation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, StatusCode> {
    let session = state.session.read().await;
    let last = session.last().ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({
        "persona": last.persona,
        "question": last.question,
        "at": last.at,
        "result": last.result,
    })))
}

#[derive(Debug, Deserialize)]
struct FeedbackBody {
    rating: Value,
}

async fn feedback(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FeedbackBody>,
) -> (StatusCode, Json<Value>) {
    // Accept 1-4 as a number or any textual form FeedbackRating parses.
    let raw = match &body.rating {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let rating = match raw.parse::<FeedbackRating>() {
        Ok(rating) => rating,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "status": "error", "message": e.to_string() })),
            )
        }
    };

    match state.session.read().await.feedback(rating) {
        Ok(thanks) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "rating": rating.key(), "message": thanks })),
        ),
        Err(e) => (
            StatusCode::CONFLICT,
            Json(json!({ "status": "error", "message": e.to_string() })),
        ),
    }
}
