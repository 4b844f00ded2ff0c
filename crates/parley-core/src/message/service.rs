//! Message service: append and cursor-paginated listing.
//!
//! Resolves public chat UUIDs to storage ids, appends messages, and pages
//! through a chat's history with an exclusive `after` cursor.

use chrono::Utc;
use parley_types::chat::Chat;
use parley_types::completion::CompletionMessage;
use parley_types::error::ChatError;
use parley_types::message::{Message, MessageRole, NewMessage};
use uuid::Uuid;

use crate::chat::repository::ChatRepository;

/// Orchestrates message persistence and retrieval within a chat.
pub struct MessageService<R: ChatRepository> {
    repo: R,
}

impl<R: ChatRepository> MessageService<R> {
    /// Create a new message service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Append a message to a chat.
    ///
    /// Fails with `ChatNotFound` if the chat UUID does not resolve.
    /// Appending does not touch the owning chat's `updated_at`.
    pub async fn append_message(
        &self,
        chat_uuid: &Uuid,
        role: MessageRole,
        content: String,
    ) -> Result<Message, ChatError> {
        let chat = self.resolve_chat(chat_uuid).await?;
        let message = NewMessage {
            uuid: Uuid::now_v7(),
            chat_id: chat.id,
            role,
            content,
            created_at: Utc::now(),
        };

        Ok(self.repo.insert_message(&message).await?)
    }

    /// List a chat's messages in `(created_at, id)` order.
    ///
    /// With an `after` cursor, returns only messages strictly after the
    /// cursor message. The cursor must identify a message in this chat,
    /// otherwise the call fails with `MessageNotFound`.
    pub async fn list_messages(
        &self,
        chat_uuid: &Uuid,
        after: Option<&Uuid>,
    ) -> Result<Vec<Message>, ChatError> {
        let chat = self.resolve_chat(chat_uuid).await?;

        match after {
            None => Ok(self.repo.list_messages(chat.id).await?),
            Some(cursor_uuid) => {
                let cursor = self
                    .repo
                    .get_message_by_uuid(chat.id, cursor_uuid)
                    .await?
                    .ok_or(ChatError::MessageNotFound)?;
                Ok(self.repo.list_messages_after(chat.id, &cursor).await?)
            }
        }
    }

    /// Load a chat's full history as provider-facing conversation turns.
    pub async fn history(&self, chat_uuid: &Uuid) -> Result<Vec<CompletionMessage>, ChatError> {
        let messages = self.list_messages(chat_uuid, None).await?;
        Ok(messages
            .into_iter()
            .map(|m| CompletionMessage {
                role: m.role,
                content: m.content,
            })
            .collect())
    }

    async fn resolve_chat(&self, chat_uuid: &Uuid) -> Result<Chat, ChatError> {
        self.repo
            .get_chat_by_uuid(chat_uuid)
            .await?
            .ok_or(ChatError::ChatNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::memory::InMemoryChatRepository;
    use crate::chat::service::ChatService;

    async fn setup() -> (MessageService<InMemoryChatRepository>, InMemoryChatRepository, Uuid) {
        let repo = InMemoryChatRepository::new();
        let chats = ChatService::new(repo.clone());
        let chat = chats.create_chat("Test chat".to_string(), None).await.unwrap();
        (MessageService::new(repo.clone()), repo, chat.uuid)
    }

    #[tokio::test]
    async fn test_append_and_list_messages() {
        let (service, _repo, chat_uuid) = setup().await;

        let first = service
            .append_message(&chat_uuid, MessageRole::User, "Hello".to_string())
            .await
            .unwrap();
        let second = service
            .append_message(&chat_uuid, MessageRole::Assistant, "Hi there!".to_string())
            .await
            .unwrap();

        let messages = service.list_messages(&chat_uuid, None).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].uuid, first.uuid);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].uuid, second.uuid);
        assert_eq!(messages[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_append_message_unknown_chat() {
        let (service, _repo, _chat_uuid) = setup().await;

        let result = service
            .append_message(&Uuid::now_v7(), MessageRole::User, "Hello".to_string())
            .await;
        assert!(matches!(result, Err(ChatError::ChatNotFound)));
    }

    #[tokio::test]
    async fn test_list_messages_after_cursor() {
        let (service, _repo, chat_uuid) = setup().await;

        let mut uuids = Vec::new();
        for content in ["one", "two", "three"] {
            let msg = service
                .append_message(&chat_uuid, MessageRole::User, content.to_string())
                .await
                .unwrap();
            uuids.push(msg.uuid);
        }

        let page = service
            .list_messages(&chat_uuid, Some(&uuids[0]))
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].content, "two");
        assert_eq!(page[1].content, "three");

        let tail = service
            .list_messages(&chat_uuid, Some(&uuids[2]))
            .await
            .unwrap();
        assert!(tail.is_empty());
    }

    #[tokio::test]
    async fn test_list_messages_after_ties_break_on_id() {
        let (service, repo, chat_uuid) = setup().await;

        // Two messages written in the same instant: only the id orders them.
        let chat = repo.get_chat_by_uuid(&chat_uuid).await.unwrap().unwrap();
        let created_at = Utc::now();
        let first = repo
            .insert_message(&NewMessage {
                uuid: Uuid::now_v7(),
                chat_id: chat.id,
                role: MessageRole::User,
                content: "first".to_string(),
                created_at,
            })
            .await
            .unwrap();
        repo.insert_message(&NewMessage {
            uuid: Uuid::now_v7(),
            chat_id: chat.id,
            role: MessageRole::User,
            content: "second".to_string(),
            created_at,
        })
        .await
        .unwrap();

        let page = service
            .list_messages(&chat_uuid, Some(&first.uuid))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].content, "second");
    }

    #[tokio::test]
    async fn test_list_messages_unknown_cursor() {
        let (service, _repo, chat_uuid) = setup().await;

        service
            .append_message(&chat_uuid, MessageRole::User, "Hello".to_string())
            .await
            .unwrap();

        let result = service
            .list_messages(&chat_uuid, Some(&Uuid::now_v7()))
            .await;
        assert!(matches!(result, Err(ChatError::MessageNotFound)));
    }

    #[tokio::test]
    async fn test_cursor_from_another_chat_rejected() {
        let (service, repo, chat_uuid) = setup().await;

        let chats = ChatService::new(repo.clone());
        let other = chats.create_chat("Other chat".to_string(), None).await.unwrap();
        let foreign = service
            .append_message(&other.uuid, MessageRole::User, "elsewhere".to_string())
            .await
            .unwrap();

        let result = service
            .list_messages(&chat_uuid, Some(&foreign.uuid))
            .await;
        assert!(matches!(result, Err(ChatError::MessageNotFound)));
    }

    #[tokio::test]
    async fn test_history_maps_roles_and_content() {
        let (service, _repo, chat_uuid) = setup().await;

        service
            .append_message(&chat_uuid, MessageRole::User, "Hi".to_string())
            .await
            .unwrap();
        service
            .append_message(&chat_uuid, MessageRole::Assistant, "Hello!".to_string())
            .await
            .unwrap();

        let history = service.history(&chat_uuid).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[0].content, "Hi");
        assert_eq!(history[1].role, MessageRole::Assistant);
        assert_eq!(history[1].content, "Hello!");
    }
}
