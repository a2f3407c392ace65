use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use domains::models::{ConversationSummary, Message, NewMessage};
use services::MessageService;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/messages", post(send))
        .route("/api/messages/conversations", get(conversations))
        .route("/api/messages/conversation/{conversation_id}", get(conversation))
}

async fn send(
    State(messages): State<MessageService>,
    ApiJson(draft): ApiJson<NewMessage>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    Ok((StatusCode::CREATED, Json(messages.post(draft).await?)))
}

async fn conversations(
    State(messages): State<MessageService>,
) -> Result<Json<Vec<ConversationSummary>>, ApiError> {
    Ok(Json(messages.conversations().await?))
}

/// Unknown conversations yield an empty list, not a 404.
async fn conversation(
    State(messages): State<MessageService>,
    ApiPath(conversation_id): ApiPath<String>,
) -> Result<Json<Vec<Message>>, ApiError> {
    Ok(Json(messages.conversation(&conversation_id).await?))
}
