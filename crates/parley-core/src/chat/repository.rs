//! ChatRepository trait definition.
//!
//! Provides persistence operations for chats and their messages.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use parley_types::chat::{Chat, NewChat};
use parley_types::error::RepositoryError;
use parley_types::message::{Message, NewMessage};
use uuid::Uuid;

/// Repository trait for chat and message persistence.
///
/// Implementations live in parley-infra (e.g., `SqliteChatRepository`).
/// Chats are addressed by their public UUID at this boundary; message
/// operations take the integer id of the owning chat, which callers obtain
/// from a resolved `Chat`.
pub trait ChatRepository: Send + Sync {
    /// Insert a new chat and return it with its storage-assigned id.
    fn insert_chat(
        &self,
        chat: &NewChat,
    ) -> impl std::future::Future<Output = Result<Chat, RepositoryError>> + Send;

    /// Get a chat by its public UUID.
    fn get_chat_by_uuid(
        &self,
        uuid: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Chat>, RepositoryError>> + Send;

    /// List all chats, newest created first.
    fn list_chats(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Chat>, RepositoryError>> + Send;

    /// Overwrite a chat's title, draft, and updated_at.
    fn update_chat(
        &self,
        chat: &Chat,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Insert a new message and return it with its storage-assigned id.
    fn insert_message(
        &self,
        message: &NewMessage,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;

    /// Get a message by UUID, scoped to the given chat.
    ///
    /// Returns `None` when the UUID is unknown or belongs to another chat.
    fn get_message_by_uuid(
        &self,
        chat_id: i64,
        uuid: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Message>, RepositoryError>> + Send;

    /// Get all messages in a chat, ordered by `(created_at, id)` ascending.
    fn list_messages(
        &self,
        chat_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Get the messages strictly after the cursor message, in the same
    /// `(created_at, id)` order as `list_messages`.
    fn list_messages_after(
        &self,
        chat_id: i64,
        cursor: &Message,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;
}
