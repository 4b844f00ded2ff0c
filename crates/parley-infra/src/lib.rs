//! Infrastructure layer for Parley.
//!
//! Contains implementations of the ports defined in `parley-core`:
//! SQLite storage for chats and messages, and the OpenAI-backed
//! completion provider.

pub mod config;
pub mod llm;
pub mod sqlite;
