//! Completion provider abstraction and the send-message relay.

pub mod provider;
pub mod relay;
