use std::sync::Arc;

use crate::{
    config::Config,
    db::{create_redis_client, RedisStore, Storage},
    error::AppResult,
    services::{
        providers::{GeminiProvider, TextGenerator},
        FlowController, RecommendationService, SearchLogger, SessionStore, Watchlist,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub sessions: Arc<SessionStore>,
    pub recommendations: RecommendationService,
    pub flow: FlowController,
    pub watchlist: Arc<Watchlist>,
    pub search_log: SearchLogger,
}

impl AppState {
    /// Wires storage and the text generator selected by the config
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let storage = match &config.redis_url {
            Some(url) => {
                let client = create_redis_client(url)?;
                let store = RedisStore::connect(client).await?;
                Storage::new(Arc::new(store), config.storage_prefix.clone())
            }
            None => {
                tracing::warn!("REDIS_URL not set, data will not outlive the process");
                Storage::in_memory()
            }
        };

        let generator: Option<Arc<dyn TextGenerator>> = config.api_key().map(|key| {
            Arc::new(GeminiProvider::new(
                key.to_string(),
                config.gemini_api_url.clone(),
                config.gemini_model.clone(),
            )) as Arc<dyn TextGenerator>
        });

        Ok(Self::new(config, storage, generator).await?)
    }

    pub async fn new(
        config: &Config,
        storage: Storage,
        generator: Option<Arc<dyn TextGenerator>>,
    ) -> AppResult<Self> {
        let sessions = SessionStore::load(storage.clone()).await?;
        let search_log = SearchLogger::new(storage.clone());
        let recommendations =
            RecommendationService::new(generator, search_log.clone(), config.mock_delay());
        let flow = FlowController::new(recommendations.clone(), config.thinking_delay());

        tracing::info!(
            storage = storage.backend(),
            mock_mode = recommendations.is_mock(),
            "Application state ready"
        );

        Ok(Self {
            watchlist: Arc::new(Watchlist::new(storage.clone())),
            storage,
            sessions: Arc::new(sessions),
            recommendations,
            flow,
            search_log,
        })
    }
}
