//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the HTTP handlers.
//! Services are generic over store/provider traits, but AppState pins them
//! to the concrete infra implementations.

use std::sync::Arc;

use fchat_core::auth::service::AuthService;
use fchat_core::chat::service::ChatService;
use fchat_infra::config::Settings;
use fchat_infra::credentials::FlatFileCredentialStore;
use fchat_infra::llm::openai_compat::config::OpenAiCompatConfig;
use fchat_infra::llm::openai_compat::OpenAiCompatibleProvider;

/// Concrete type alias for the auth service pinned to the flat-file store.
pub type ConcreteAuthService = AuthService<FlatFileCredentialStore>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<ConcreteAuthService>,
    pub chat_service: Arc<ChatService>,
}

impl AppState {
    /// Initialize the application state: open the credential store, wire
    /// the provider and services.
    pub async fn init(settings: &Settings) -> anyhow::Result<Self> {
        let store = FlatFileCredentialStore::open(&settings.userdata_dir).await?;
        let auth_service = AuthService::new(store);

        let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig {
            provider_name: "openai".to_string(),
            base_url: settings.api_base.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        });
        let chat_service = ChatService::new(Arc::new(provider), settings.generation_profile());

        Ok(Self {
            auth_service: Arc::new(auth_service),
            chat_service: Arc::new(chat_service),
        })
    }
}
