//! Application state wiring all services together.
//!
//! Services are generic over the repository and provider traits, but
//! AppState pins them to the concrete infra implementations.

use std::sync::Arc;

use parley_core::chat::service::ChatService;
use parley_core::completion::relay::{CompletionRelay, CompletionSettings};
use parley_core::message::service::MessageService;
use parley_infra::config::{CompletionConfig, resolve_data_dir};
use parley_infra::llm::openai::OpenAiCompletionProvider;
use parley_infra::sqlite::chat::SqliteChatRepository;
use parley_infra::sqlite::pool::DatabasePool;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteChatRepository>;

pub type ConcreteMessageService = MessageService<SqliteChatRepository>;

pub type ConcreteCompletionRelay =
    CompletionRelay<SqliteChatRepository, OpenAiCompletionProvider>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub message_service: Arc<ConcreteMessageService>,
    pub relay: Arc<ConcreteCompletionRelay>,
}

impl AppState {
    /// Initialize the application state: connect to the database, wire services.
    ///
    /// When `database_url` is None, the database file lives in the data
    /// directory (`PARLEY_DATA_DIR`, default `~/.parley`), which is created
    /// if missing.
    pub async fn init(
        database_url: Option<String>,
        completion: CompletionConfig,
    ) -> anyhow::Result<Self> {
        let db_url = match database_url {
            Some(url) => url,
            None => {
                let data_dir = resolve_data_dir();
                tokio::fs::create_dir_all(&data_dir).await?;
                format!("sqlite://{}?mode=rwc", data_dir.join("parley.db").display())
            }
        };
        let db_pool = DatabasePool::new(&db_url).await?;

        // Each service gets its own repository handle over the shared pool
        let chat_service = ChatService::new(SqliteChatRepository::new(db_pool.clone()));
        let message_service = MessageService::new(SqliteChatRepository::new(db_pool.clone()));

        // The relay owns its own message service next to the provider
        let settings = CompletionSettings {
            model: completion.model.clone(),
            temperature: completion.temperature,
        };
        let provider = OpenAiCompletionProvider::new(&completion);
        let relay = CompletionRelay::new(
            MessageService::new(SqliteChatRepository::new(db_pool.clone())),
            provider,
            settings,
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
            message_service: Arc::new(message_service),
            relay: Arc::new(relay),
        })
    }
}
