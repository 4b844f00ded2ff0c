//! Send-message relay: persist the inbound message, run one completion over
//! the chat's history, persist the assistant reply.
//!
//! The relay is the only place where storage and the completion provider
//! meet. The two writes are independent commits: a failed provider call
//! leaves the already-committed inbound message in place. No rollback, no
//! retries.

use parley_types::completion::{CompletionError, CompletionRequest};
use parley_types::error::ChatError;
use parley_types::message::{Message, MessageRole};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chat::repository::ChatRepository;
use crate::completion::provider::CompletionProvider;
use crate::message::service::MessageService;

/// Model and sampling configuration applied to every relayed completion.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
}

/// Relays an inbound message through the completion provider and persists
/// the assistant reply.
pub struct CompletionRelay<R: ChatRepository, P: CompletionProvider> {
    messages: MessageService<R>,
    provider: P,
    settings: CompletionSettings,
}

impl<R: ChatRepository, P: CompletionProvider> CompletionRelay<R, P> {
    /// Create a new relay over the given message service and provider.
    pub fn new(messages: MessageService<R>, provider: P, settings: CompletionSettings) -> Self {
        Self {
            messages,
            provider,
            settings,
        }
    }

    /// Persist the inbound message, obtain one completion over the chat's
    /// full ordered history, persist the assistant reply, and return it.
    ///
    /// Fails with `ChatNotFound` before any write when the chat UUID does
    /// not resolve, and with `Upstream` after the inbound commit when the
    /// provider call fails or produces no usable content.
    pub async fn send_message(
        &self,
        chat_uuid: &Uuid,
        role: MessageRole,
        content: String,
    ) -> Result<Message, ChatError> {
        let inbound = self
            .messages
            .append_message(chat_uuid, role, content)
            .await?;
        debug!(chat = %chat_uuid, message = %inbound.uuid, "Inbound message persisted");

        let history = self.messages.history(chat_uuid).await?;
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: history,
            temperature: Some(self.settings.temperature),
        };

        let response = match self.provider.complete(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    chat = %chat_uuid,
                    provider = self.provider.name(),
                    error = %err,
                    "Completion failed; inbound message kept"
                );
                return Err(ChatError::Upstream(err));
            }
        };

        if response.content.trim().is_empty() {
            warn!(
                chat = %chat_uuid,
                provider = self.provider.name(),
                "Provider returned empty content; inbound message kept"
            );
            return Err(ChatError::Upstream(CompletionError::Empty));
        }

        let reply = self
            .messages
            .append_message(chat_uuid, MessageRole::Assistant, response.content)
            .await?;
        info!(
            chat = %chat_uuid,
            reply = %reply.uuid,
            model = %response.model,
            "Assistant reply persisted"
        );

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::memory::InMemoryChatRepository;
    use crate::chat::service::ChatService;
    use parley_types::completion::CompletionResponse;
    use std::future::Future;
    use std::sync::{Arc, Mutex};

    // --- Mock provider ---

    struct MockProvider {
        result: MockResult,
        seen: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    #[derive(Clone)]
    enum MockResult {
        Reply(String),
        Fail,
    }

    impl MockProvider {
        fn new(result: MockResult) -> Self {
            Self {
                result,
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl CompletionProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn complete(
            &self,
            request: &CompletionRequest,
        ) -> impl Future<Output = Result<CompletionResponse, CompletionError>> + Send {
            self.seen.lock().unwrap().push(request.clone());
            let result = self.result.clone();
            async move {
                match result {
                    MockResult::Reply(content) => Ok(CompletionResponse {
                        content,
                        model: "mock-model".to_string(),
                    }),
                    MockResult::Fail => Err(CompletionError::Provider {
                        message: "mock failure".to_string(),
                    }),
                }
            }
        }
    }

    struct Fixture {
        relay: CompletionRelay<InMemoryChatRepository, MockProvider>,
        messages: MessageService<InMemoryChatRepository>,
        seen: Arc<Mutex<Vec<CompletionRequest>>>,
        chat_uuid: Uuid,
    }

    async fn setup(result: MockResult) -> Fixture {
        let repo = InMemoryChatRepository::new();
        let chats = ChatService::new(repo.clone());
        let chat = chats.create_chat("Test chat".to_string(), None).await.unwrap();

        let provider = MockProvider::new(result);
        let seen = provider.seen.clone();
        let relay = CompletionRelay::new(
            MessageService::new(repo.clone()),
            provider,
            CompletionSettings {
                model: "mock-model".to_string(),
                temperature: 0.7,
            },
        );

        Fixture {
            relay,
            messages: MessageService::new(repo),
            seen,
            chat_uuid: chat.uuid,
        }
    }

    #[tokio::test]
    async fn test_send_message_returns_assistant_reply() {
        let fx = setup(MockResult::Reply("Hello! How can I help?".to_string())).await;

        let reply = fx
            .relay
            .send_message(&fx.chat_uuid, MessageRole::User, "Hi".to_string())
            .await
            .unwrap();

        assert_eq!(reply.role, MessageRole::Assistant);
        assert_eq!(reply.content, "Hello! How can I help?");

        let stored = fx.messages.list_messages(&fx.chat_uuid, None).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].role, MessageRole::User);
        assert_eq!(stored[0].content, "Hi");
        assert_eq!(stored[1].uuid, reply.uuid);
    }

    #[tokio::test]
    async fn test_send_message_provider_sees_full_history() {
        let fx = setup(MockResult::Reply("ok".to_string())).await;

        fx.relay
            .send_message(&fx.chat_uuid, MessageRole::User, "first".to_string())
            .await
            .unwrap();
        fx.relay
            .send_message(&fx.chat_uuid, MessageRole::User, "second".to_string())
            .await
            .unwrap();

        let seen = fx.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);

        // First call: just the inbound message.
        assert_eq!(seen[0].model, "mock-model");
        assert_eq!(seen[0].temperature, Some(0.7));
        assert_eq!(seen[0].messages.len(), 1);
        assert_eq!(seen[0].messages[0].role, MessageRole::User);
        assert_eq!(seen[0].messages[0].content, "first");

        // Second call: prior exchange plus the new inbound message, in order.
        assert_eq!(seen[1].messages.len(), 3);
        assert_eq!(seen[1].messages[0].content, "first");
        assert_eq!(seen[1].messages[1].role, MessageRole::Assistant);
        assert_eq!(seen[1].messages[1].content, "ok");
        assert_eq!(seen[1].messages[2].content, "second");
    }

    #[tokio::test]
    async fn test_send_message_keeps_inbound_on_provider_failure() {
        let fx = setup(MockResult::Fail).await;

        let result = fx
            .relay
            .send_message(&fx.chat_uuid, MessageRole::User, "Hi".to_string())
            .await;
        assert!(matches!(
            result,
            Err(ChatError::Upstream(CompletionError::Provider { .. }))
        ));

        // The inbound message stays committed; no assistant reply appears.
        let stored = fx.messages.list_messages(&fx.chat_uuid, None).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].role, MessageRole::User);
        assert_eq!(stored[0].content, "Hi");
    }

    #[tokio::test]
    async fn test_send_message_rejects_empty_reply() {
        let fx = setup(MockResult::Reply("   ".to_string())).await;

        let result = fx
            .relay
            .send_message(&fx.chat_uuid, MessageRole::User, "Hi".to_string())
            .await;
        assert!(matches!(
            result,
            Err(ChatError::Upstream(CompletionError::Empty))
        ));

        let stored = fx.messages.list_messages(&fx.chat_uuid, None).await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_send_message_unknown_chat_writes_nothing() {
        let fx = setup(MockResult::Reply("ok".to_string())).await;

        let result = fx
            .relay
            .send_message(&Uuid::now_v7(), MessageRole::User, "Hi".to_string())
            .await;
        assert!(matches!(result, Err(ChatError::ChatNotFound)));

        assert!(fx.seen.lock().unwrap().is_empty(), "provider must not be called");
        let stored = fx.messages.list_messages(&fx.chat_uuid, None).await.unwrap();
        assert!(stored.is_empty());
    }
}
