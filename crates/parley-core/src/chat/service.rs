//! Chat service owning chat lifecycle and metadata rules.
//!
//! ChatService creates chats, lists them newest first, and applies the
//! full-overwrite update semantics for title and draft.

use chrono::Utc;
use parley_types::chat::{Chat, NewChat};
use parley_types::error::ChatError;
use tracing::info;
use uuid::Uuid;

use crate::chat::repository::ChatRepository;

/// Orchestrates chat lifecycle: create, fetch, list, update.
///
/// Generic over `ChatRepository` to maintain clean architecture --
/// parley-core never depends on parley-infra.
pub struct ChatService<R: ChatRepository> {
    repo: R,
}

impl<R: ChatRepository> ChatService<R> {
    /// Create a new chat service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new chat with a fresh UUID and matching timestamps.
    pub async fn create_chat(
        &self,
        title: String,
        new_message: Option<String>,
    ) -> Result<Chat, ChatError> {
        let now = Utc::now();
        let chat = NewChat {
            uuid: Uuid::now_v7(),
            title,
            new_message,
            created_at: now,
            updated_at: now,
        };

        let chat = self.repo.insert_chat(&chat).await?;
        info!(chat = %chat.uuid, "Chat created");
        Ok(chat)
    }

    /// Get a chat by its public UUID.
    pub async fn get_chat(&self, uuid: &Uuid) -> Result<Chat, ChatError> {
        self.repo
            .get_chat_by_uuid(uuid)
            .await?
            .ok_or(ChatError::ChatNotFound)
    }

    /// List all chats, newest created first.
    pub async fn list_chats(&self) -> Result<Vec<Chat>, ChatError> {
        Ok(self.repo.list_chats().await?)
    }

    /// Overwrite a chat's title and draft, refreshing `updated_at`.
    ///
    /// Both fields are replaced unconditionally: an update that carries no
    /// draft clears any stored draft.
    pub async fn update_chat(
        &self,
        uuid: &Uuid,
        title: String,
        new_message: Option<String>,
    ) -> Result<Chat, ChatError> {
        let mut chat = self.get_chat(uuid).await?;
        chat.title = title;
        chat.new_message = new_message;
        chat.updated_at = Utc::now();

        self.repo.update_chat(&chat).await?;
        info!(chat = %chat.uuid, "Chat updated");
        Ok(chat)
    }
}
