//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `parley-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, UUID lookups for
//! everything the HTTP layer touches. Integer primary keys stay internal.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;
use uuid::Uuid;

use parley_core::chat::repository::ChatRepository;
use parley_types::chat::{Chat, NewChat};
use parley_types::error::RepositoryError;
use parley_types::message::{Message, MessageRole, NewMessage};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain Chat.
struct ChatRow {
    id: i64,
    uuid: String,
    title: String,
    new_message: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            uuid: row.try_get("uuid")?,
            title: row.try_get("title")?,
            new_message: row.try_get("new_message")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_chat(self) -> Result<Chat, RepositoryError> {
        let uuid = Uuid::parse_str(&self.uuid)
            .map_err(|e| RepositoryError::Query(format!("invalid chat uuid: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(Chat {
            id: self.id,
            uuid,
            title: self.title,
            new_message: self.new_message,
            created_at,
            updated_at,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain Message.
struct MessageRow {
    id: i64,
    uuid: String,
    chat_id: i64,
    role: String,
    content: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            uuid: row.try_get("uuid")?,
            chat_id: row.try_get("chat_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let uuid = Uuid::parse_str(&self.uuid)
            .map_err(|e| RepositoryError::Query(format!("invalid message uuid: {e}")))?;
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Message {
            id: self.id,
            uuid,
            chat_id: self.chat_id,
            role,
            content: self.content,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width RFC 3339 with microsecond precision. Every stored timestamp
/// has the same length, so the string comparisons in the cursor query
/// compare chronologically.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn insert_chat(&self, chat: &NewChat) -> Result<Chat, RepositoryError> {
        let result = sqlx::query(
            r#"INSERT INTO chats (uuid, title, new_message, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(chat.uuid.to_string())
        .bind(&chat.title)
        .bind(&chat.new_message)
        .bind(format_datetime(&chat.created_at))
        .bind(format_datetime(&chat.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Chat {
            id: result.last_insert_rowid(),
            uuid: chat.uuid,
            title: chat.title.clone(),
            new_message: chat.new_message.clone(),
            created_at: chat.created_at,
            updated_at: chat.updated_at,
        })
    }

    async fn get_chat_by_uuid(&self, uuid: &Uuid) -> Result<Option<Chat>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chats WHERE uuid = ?")
            .bind(uuid.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let chat_row = ChatRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(chat_row.into_chat()?))
            }
            None => Ok(None),
        }
    }

    async fn list_chats(&self) -> Result<Vec<Chat>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM chats ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut chats = Vec::with_capacity(rows.len());
        for row in &rows {
            let chat_row = ChatRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            chats.push(chat_row.into_chat()?);
        }

        Ok(chats)
    }

    async fn update_chat(&self, chat: &Chat) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE chats
               SET title = ?, new_message = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&chat.title)
        .bind(&chat.new_message)
        .bind(format_datetime(&chat.updated_at))
        .bind(chat.id)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn insert_message(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        let result = sqlx::query(
            r#"INSERT INTO messages (uuid, chat_id, role, content, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(message.uuid.to_string())
        .bind(message.chat_id)
        .bind(message.role.to_string())
        .bind(&message.content)
        .bind(format_datetime(&message.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Message {
            id: result.last_insert_rowid(),
            uuid: message.uuid,
            chat_id: message.chat_id,
            role: message.role.clone(),
            content: message.content.clone(),
            created_at: message.created_at,
        })
    }

    async fn get_message_by_uuid(
        &self,
        chat_id: i64,
        uuid: &Uuid,
    ) -> Result<Option<Message>, RepositoryError> {
        // Scoped to the chat: a UUID belonging to another chat comes back None.
        let row = sqlx::query("SELECT * FROM messages WHERE chat_id = ? AND uuid = ?")
            .bind(chat_id)
            .bind(uuid.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let msg_row = MessageRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(msg_row.into_message()?))
            }
            None => Ok(None),
        }
    }

    async fn list_messages(&self, chat_id: i64) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM messages WHERE chat_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(chat_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row = MessageRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }

    async fn list_messages_after(
        &self,
        chat_id: i64,
        cursor: &Message,
    ) -> Result<Vec<Message>, RepositoryError> {
        // The cursor row itself is excluded: strictly after (created_at, id).
        let cursor_ts = format_datetime(&cursor.created_at);
        let rows = sqlx::query(
            r#"SELECT * FROM messages
               WHERE chat_id = ? AND (created_at > ? OR (created_at = ? AND id > ?))
               ORDER BY created_at ASC, id ASC"#,
        )
        .bind(chat_id)
        .bind(&cursor_ts)
        .bind(&cursor_ts)
        .bind(cursor.id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row = MessageRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }
}
