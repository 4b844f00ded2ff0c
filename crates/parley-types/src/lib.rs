//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the Parley backend:
//! Chat, Message, completion request/response shapes, and their associated
//! error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod completion;
pub mod error;
pub mod message;
