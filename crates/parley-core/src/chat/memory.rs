//! In-memory `ChatRepository` used by service and relay tests.
//!
//! Mirrors the ordering semantics of the SQLite implementation: chats list
//! newest first, messages in `(created_at, id)` order, cursors compare as
//! strict tuples.

use std::sync::{Arc, Mutex};

use parley_types::chat::{Chat, NewChat};
use parley_types::error::RepositoryError;
use parley_types::message::{Message, NewMessage};
use uuid::Uuid;

use crate::chat::repository::ChatRepository;

#[derive(Default)]
struct Store {
    chats: Vec<Chat>,
    messages: Vec<Message>,
    next_chat_id: i64,
    next_message_id: i64,
}

/// In-memory repository backed by a shared store.
///
/// Clones share the same store, mirroring how pool-backed repositories
/// share one database.
#[derive(Clone, Default)]
pub(crate) struct InMemoryChatRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryChatRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl ChatRepository for InMemoryChatRepository {
    async fn insert_chat(&self, chat: &NewChat) -> Result<Chat, RepositoryError> {
        let mut store = self.store.lock().unwrap();
        store.next_chat_id += 1;
        let chat = Chat {
            id: store.next_chat_id,
            uuid: chat.uuid,
            title: chat.title.clone(),
            new_message: chat.new_message.clone(),
            created_at: chat.created_at,
            updated_at: chat.updated_at,
        };
        store.chats.push(chat.clone());
        Ok(chat)
    }

    async fn get_chat_by_uuid(&self, uuid: &Uuid) -> Result<Option<Chat>, RepositoryError> {
        let store = self.store.lock().unwrap();
        Ok(store.chats.iter().find(|c| c.uuid == *uuid).cloned())
    }

    async fn list_chats(&self) -> Result<Vec<Chat>, RepositoryError> {
        let store = self.store.lock().unwrap();
        let mut chats = store.chats.clone();
        chats.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(chats)
    }

    async fn update_chat(&self, chat: &Chat) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().unwrap();
        match store.chats.iter_mut().find(|c| c.id == chat.id) {
            Some(stored) => {
                *stored = chat.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn insert_message(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        let mut store = self.store.lock().unwrap();
        store.next_message_id += 1;
        let message = Message {
            id: store.next_message_id,
            uuid: message.uuid,
            chat_id: message.chat_id,
            role: message.role.clone(),
            content: message.content.clone(),
            created_at: message.created_at,
        };
        store.messages.push(message.clone());
        Ok(message)
    }

    async fn get_message_by_uuid(
        &self,
        chat_id: i64,
        uuid: &Uuid,
    ) -> Result<Option<Message>, RepositoryError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .messages
            .iter()
            .find(|m| m.chat_id == chat_id && m.uuid == *uuid)
            .cloned())
    }

    async fn list_messages(&self, chat_id: i64) -> Result<Vec<Message>, RepositoryError> {
        let store = self.store.lock().unwrap();
        let mut messages: Vec<Message> = store
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(messages)
    }

    async fn list_messages_after(
        &self,
        chat_id: i64,
        cursor: &Message,
    ) -> Result<Vec<Message>, RepositoryError> {
        let after = (cursor.created_at, cursor.id);
        let store = self.store.lock().unwrap();
        let mut messages: Vec<Message> = store
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id && (m.created_at, m.id) > after)
            .cloned()
            .collect();
        messages.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(messages)
    }
}
