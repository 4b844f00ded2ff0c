//! Chat CRUD HTTP handlers.
//!
//! Endpoints:
//! - GET   /chats        - List all chats, newest first
//! - POST  /chats        - Create a chat
//! - GET   /chats/{uuid} - Get a single chat
//! - PATCH /chats/{uuid} - Replace a chat's title and draft

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use parley_types::chat::Chat;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for creating a chat.
#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    pub title: String,
    #[serde(default)]
    pub new_message: Option<String>,
}

/// Request body for updating a chat.
///
/// Both fields are full replacements: omitting `new_message` clears any
/// stored draft.
#[derive(Debug, Deserialize)]
pub struct UpdateChatRequest {
    pub title: String,
    #[serde(default)]
    pub new_message: Option<String>,
}

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
pub(super) fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// GET /chats - List all chats, newest first.
pub async fn list_chats(State(state): State<AppState>) -> Result<Json<Vec<Chat>>, AppError> {
    let chats = state.chat_service.list_chats().await?;
    Ok(Json(chats))
}

/// GET /chats/{uuid} - Get a chat by UUID.
pub async fn get_chat(
    State(state): State<AppState>,
    Path(chat_uuid): Path<String>,
) -> Result<Json<Chat>, AppError> {
    let uuid = parse_uuid(&chat_uuid)?;
    let chat = state.chat_service.get_chat(&uuid).await?;
    Ok(Json(chat))
}

/// POST /chats - Create a chat.
pub async fn create_chat(
    State(state): State<AppState>,
    Json(body): Json<CreateChatRequest>,
) -> Result<Json<Chat>, AppError> {
    let chat = state
        .chat_service
        .create_chat(body.title, body.new_message)
        .await?;
    Ok(Json(chat))
}

/// PATCH /chats/{uuid} - Replace a chat's title and draft.
pub async fn update_chat(
    State(state): State<AppState>,
    Path(chat_uuid): Path<String>,
    Json(body): Json<UpdateChatRequest>,
) -> Result<Json<Chat>, AppError> {
    let uuid = parse_uuid(&chat_uuid)?;
    let chat = state
        .chat_service
        .update_chat(&uuid, body.title, body.new_message)
        .await?;
    Ok(Json(chat))
}
