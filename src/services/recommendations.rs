use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::{Preferences, RecommendationItem},
    services::{
        fallback,
        prompt::{build_prompt, strip_code_fences, RECOMMENDATION_COUNT},
        providers::TextGenerator,
        search_log::SearchLogger,
    },
};

/// Generates mood-based recommendations
///
/// With a text generator configured, asks the model and strictly decodes its
/// reply. Without one (mock mode), serves the built-in catalog after a
/// simulated delay. Either way the call never fails: every error on the
/// model path degrades to the full built-in catalog.
#[derive(Clone)]
pub struct RecommendationService {
    generator: Option<Arc<dyn TextGenerator>>,
    search_log: SearchLogger,
    mock_delay: Duration,
}

impl RecommendationService {
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        search_log: SearchLogger,
        mock_delay: Duration,
    ) -> Self {
        if generator.is_none() {
            tracing::warn!("No text generator configured, recommendations run in mock mode");
        }

        Self {
            generator,
            search_log,
            mock_delay,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.generator.is_none()
    }

    pub async fn get_recommendations(&self, prefs: &Preferences) -> Vec<RecommendationItem> {
        self.search_log.record_quietly(&prefs.search_term()).await;

        let Some(generator) = &self.generator else {
            tokio::time::sleep(self.mock_delay).await;
            let items = fallback::for_request(prefs.mood, prefs.category);
            tracing::info!(
                mood = %prefs.mood,
                category = %prefs.category,
                results = items.len(),
                "Served mock recommendations"
            );
            return items;
        };

        match self.ask_model(generator.as_ref(), prefs).await {
            Ok(items) => {
                tracing::info!(
                    mood = %prefs.mood,
                    category = %prefs.category,
                    results = items.len(),
                    provider = generator.name(),
                    "Served model recommendations"
                );
                items
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    provider = generator.name(),
                    "Recommendation request failed, serving fallback list"
                );
                fallback::all()
            }
        }
    }

    async fn ask_model(
        &self,
        generator: &dyn TextGenerator,
        prefs: &Preferences,
    ) -> AppResult<Vec<RecommendationItem>> {
        let prompt = build_prompt(prefs);
        let reply = generator.generate(&prompt).await?;
        parse_reply(&reply)
    }
}

/// Decodes a model reply into at most [`RECOMMENDATION_COUNT`] items
///
/// Anything but a JSON array of well-formed items is an error.
pub fn parse_reply(reply: &str) -> AppResult<Vec<RecommendationItem>> {
    let cleaned = strip_code_fences(reply);
    let mut items: Vec<RecommendationItem> = serde_json::from_str(&cleaned).map_err(|e| {
        tracing::debug!(reply = %cleaned, "Unparseable model reply");
        AppError::ExternalApi(format!("Model reply is not a recommendation list: {}", e))
    })?;

    items.truncate(RECOMMENDATION_COUNT);
    Ok(items)
}
