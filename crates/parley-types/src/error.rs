use thiserror::Error;

use crate::completion::CompletionError;

/// Errors from repository operations (used by trait definitions in parley-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from chat and message operations.
///
/// `Upstream` means the inbound user message was already committed when the
/// provider call failed; callers surface it as a gateway error, not a loss
/// of data.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat not found")]
    ChatNotFound,

    #[error("message not found")]
    MessageNotFound,

    #[error("completion provider failure: {0}")]
    Upstream(#[source] CompletionError),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}
