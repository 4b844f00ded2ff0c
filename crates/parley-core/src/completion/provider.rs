//! CompletionProvider trait definition.
//!
//! This is the abstraction the relay calls to obtain an assistant reply.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use parley_types::completion::{CompletionError, CompletionRequest, CompletionResponse};

/// Trait for completion provider backends (OpenAI-compatible APIs).
///
/// Implementations live in parley-infra (e.g., `OpenAiCompletionProvider`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, CompletionError>> + Send;
}
