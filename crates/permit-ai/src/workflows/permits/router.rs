use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::conversation::{Conversation, ConversationEvent};
use super::domain::{ApplicationId, EventRecord};
use super::repository::{PermitRepository, PersistError};
use super::service::{ConversationReply, PermitDeskService};

/// Router builder exposing the quote, submission, and conversation endpoints.
/// The server holds no session state; each conversation turn carries its
/// snapshot in the request body.
pub fn permit_router<R>(service: Arc<PermitDeskService<R>>) -> Router
where
    R: PermitRepository + 'static,
{
    Router::new()
        .route("/api/v1/permits/quote", post(quote_handler::<R>))
        .route("/api/v1/permits", post(submit_handler::<R>))
        .route("/api/v1/permits/:application_id", get(fetch_handler::<R>))
        .route(
            "/api/v1/permits/conversation",
            post(conversation_handler::<R>),
        )
        .with_state(service)
}

/// One turn of the guided conversation. A missing snapshot starts a fresh
/// session.
#[derive(Debug, Deserialize)]
pub struct ConversationTurnRequest {
    #[serde(default)]
    pub conversation: Option<Conversation>,
    pub event: ConversationEvent,
}

#[derive(Debug, Serialize)]
pub struct ConversationTurnResponse {
    pub conversation: Conversation,
    pub reply: ConversationReply,
}

pub(crate) async fn quote_handler<R>(
    State(service): State<Arc<PermitDeskService<R>>>,
    axum::Json(payload): axum::Json<serde_json::Value>,
) -> Response
where
    R: PermitRepository + 'static,
{
    // Malformed submissions come back as the zero-total sentinel, not an
    // HTTP error; callers check the total and notes.
    let quote = service.quote_raw(&payload);
    (StatusCode::OK, axum::Json(quote)).into_response()
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<PermitDeskService<R>>>,
    axum::Json(record): axum::Json<EventRecord>,
) -> Response
where
    R: PermitRepository + 'static,
{
    match service.submit(record) {
        Ok(application) => {
            let view = application.status_view();
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error @ PersistError::Validation(_)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(error @ (PersistError::Timeout(_) | PersistError::Connection(_))) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<PermitDeskService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: PermitRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.fetch(&id) {
        Ok(Some(application)) => (StatusCode::OK, axum::Json(application)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": format!("no application '{}'", id.0) });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn conversation_handler<R>(
    State(service): State<Arc<PermitDeskService<R>>>,
    axum::Json(request): axum::Json<ConversationTurnRequest>,
) -> Response
where
    R: PermitRepository + 'static,
{
    let mut conversation = request.conversation.unwrap_or_default();
    let reply = service.handle(&mut conversation, request.event);

    let response = ConversationTurnResponse {
        conversation,
        reply,
    };
    (StatusCode::OK, axum::Json(response)).into_response()
}
