//! Chat conversation types for Parley.
//!
//! A chat is addressed publicly by its UUID; the integer `id` is the SQLite
//! rowid and never appears in URLs. Clients page through a chat's messages
//! with the cursor types in the `message` module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored chat conversation.
///
/// `new_message` holds the client's unsent draft so the composer can be
/// restored when the chat is reopened. `updated_at` moves on every metadata
/// update; appending messages does not touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub uuid: Uuid,
    pub title: String,
    pub new_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A chat assembled by the service layer, before the database has assigned
/// its integer id.
#[derive(Debug, Clone)]
pub struct NewChat {
    pub uuid: Uuid,
    pub title: String,
    pub new_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
