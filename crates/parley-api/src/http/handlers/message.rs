//! Message HTTP handlers.
//!
//! Endpoints:
//! - GET  /chats/{uuid}/messages - List a chat's messages, oldest first
//! - POST /chats/{uuid}/messages - Send a message, return the assistant reply

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use parley_types::message::{Message, MessageRole};

use super::chat::parse_uuid;
use crate::http::error::AppError;
use crate::state::AppState;

/// Query parameters for message listing.
#[derive(Debug, Deserialize)]
pub struct MessageListQuery {
    /// UUID of the last message the client already has; only messages
    /// strictly after it are returned.
    #[serde(default)]
    pub after: Option<String>,
}

/// An attachment sent along with a message.
///
/// Accepted and ignored: the payload is not stored and never reaches the
/// model.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct MessageAttachment {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

/// Request body for sending a message.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub role: MessageRole,
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<MessageAttachment>,
}

/// GET /chats/{uuid}/messages - List messages, optionally after a cursor.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(chat_uuid): Path<String>,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<Vec<Message>>, AppError> {
    let uuid = parse_uuid(&chat_uuid)?;
    let after = query.after.as_deref().map(parse_uuid).transpose()?;

    let messages = state
        .message_service
        .list_messages(&uuid, after.as_ref())
        .await?;
    Ok(Json(messages))
}

/// POST /chats/{uuid}/messages - Persist the message, relay the chat's
/// history to the model, and return the persisted assistant reply.
pub async fn send_message(
    State(state): State<AppState>,
    Path(chat_uuid): Path<String>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<Message>, AppError> {
    let uuid = parse_uuid(&chat_uuid)?;

    if !body.attachments.is_empty() {
        tracing::debug!(
            chat = %uuid,
            count = body.attachments.len(),
            "Ignoring attachments on inbound message"
        );
    }

    let reply = state
        .relay
        .send_message(&uuid, body.role, body.content)
        .await?;
    Ok(Json(reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_defaults_to_user_role() {
        let body: SendMessageRequest = serde_json::from_str(r#"{"content": "hi"}"#).unwrap();
        assert_eq!(body.role, MessageRole::User);
        assert!(body.attachments.is_empty());
    }

    #[test]
    fn test_send_request_accepts_attachments() {
        let body: SendMessageRequest = serde_json::from_str(
            r#"{
                "content": "see attached",
                "attachments": [
                    {"name": "notes.txt", "content_type": "text/plain", "data": "aGVsbG8="}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(body.attachments.len(), 1);
        assert_eq!(body.attachments[0].name.as_deref(), Some("notes.txt"));
    }

    #[test]
    fn test_list_query_without_after() {
        let query: MessageListQuery = serde_json::from_str("{}").unwrap();
        assert!(query.after.is_none());
    }
}
