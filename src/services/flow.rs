use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::{
    error::{AppError, AppResult},
    models::{Category, Mood, Preferences, RecommendationItem},
    services::recommendations::RecommendationService,
};

/// Step of the recommendation flow
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum FlowState {
    Mood,
    Form {
        mood: Mood,
    },
    Loading {
        preferences: Preferences,
    },
    Results {
        preferences: Preferences,
        results: Vec<RecommendationItem>,
    },
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::Mood => "mood",
            FlowState::Form { .. } => "form",
            FlowState::Loading { .. } => "loading",
            FlowState::Results { .. } => "results",
        }
    }
}

/// Preference form contents. The mood comes from the previous step
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub favorites: String,
    #[serde(default)]
    pub critically_acclaimed: bool,
}

/// mood → form → loading → results, with back and reset
///
/// Every submission bumps `generation`. A completion carrying an older
/// generation belongs to a request the user has walked away from and is
/// dropped.
#[derive(Debug)]
pub struct Flow {
    state: FlowState,
    generation: u64,
}

impl Default for Flow {
    fn default() -> Self {
        Self::new()
    }
}

impl Flow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Mood,
            generation: 0,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn select_mood(&mut self, mood: Mood) -> AppResult<()> {
        match self.state {
            FlowState::Mood => {
                self.state = FlowState::Form { mood };
                Ok(())
            }
            _ => Err(self.rejected("select a mood")),
        }
    }

    pub fn back(&mut self) -> AppResult<()> {
        match self.state {
            FlowState::Form { .. } => {
                self.state = FlowState::Mood;
                Ok(())
            }
            _ => Err(self.rejected("go back")),
        }
    }

    /// Moves to loading and returns the request to run with its generation
    pub fn submit(
        &mut self,
        input: FormInput,
        user_age: Option<u32>,
    ) -> AppResult<(u64, Preferences)> {
        let FlowState::Form { mood } = self.state else {
            return Err(self.rejected("submit"));
        };

        let preferences = Preferences {
            mood,
            category: input.category,
            favorites: input.favorites,
            user_age,
            critically_acclaimed: input.critically_acclaimed,
        };

        self.generation += 1;
        self.state = FlowState::Loading {
            preferences: preferences.clone(),
        };
        Ok((self.generation, preferences))
    }

    /// Shows results if `generation` is still the pending request
    pub fn complete(&mut self, generation: u64, results: Vec<RecommendationItem>) -> bool {
        if generation != self.generation {
            return false;
        }

        match std::mem::replace(&mut self.state, FlowState::Mood) {
            FlowState::Loading { preferences } => {
                self.state = FlowState::Results {
                    preferences,
                    results,
                };
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Back to mood selection from anywhere. Orphans any pending request
    pub fn reset(&mut self) {
        if matches!(self.state, FlowState::Loading { .. }) {
            self.generation += 1;
        }
        self.state = FlowState::Mood;
    }

    fn rejected(&self, action: &'static str) -> AppError {
        AppError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}

/// Shared flow plus the background work behind a submission
#[derive(Clone)]
pub struct FlowController {
    flow: Arc<Mutex<Flow>>,
    recommendations: RecommendationService,
    thinking_delay: Duration,
}

impl FlowController {
    pub fn new(recommendations: RecommendationService, thinking_delay: Duration) -> Self {
        Self {
            flow: Arc::new(Mutex::new(Flow::new())),
            recommendations,
            thinking_delay,
        }
    }

    pub async fn state(&self) -> FlowState {
        self.flow.lock().await.state().clone()
    }

    pub async fn select_mood(&self, mood: Mood) -> AppResult<FlowState> {
        let mut flow = self.flow.lock().await;
        flow.select_mood(mood)?;
        Ok(flow.state().clone())
    }

    pub async fn back(&self) -> AppResult<FlowState> {
        let mut flow = self.flow.lock().await;
        flow.back()?;
        Ok(flow.state().clone())
    }

    pub async fn reset(&self) -> FlowState {
        let mut flow = self.flow.lock().await;
        flow.reset();
        flow.state().clone()
    }

    /// Enters loading and fetches recommendations in the background
    ///
    /// The request is not cancellable. If the flow moves on before it
    /// finishes, its results are discarded.
    pub async fn submit(&self, input: FormInput, user_age: Option<u32>) -> AppResult<FlowState> {
        let (generation, preferences, state) = {
            let mut flow = self.flow.lock().await;
            let (generation, preferences) = flow.submit(input, user_age)?;
            (generation, preferences, flow.state().clone())
        };

        let flow = self.flow.clone();
        let recommendations = self.recommendations.clone();
        let thinking_delay = self.thinking_delay;

        tokio::spawn(async move {
            tokio::time::sleep(thinking_delay).await;
            let results = recommendations.get_recommendations(&preferences).await;
            let count = results.len();

            if flow.lock().await.complete(generation, results) {
                tracing::debug!(generation, results = count, "Flow moved to results");
            } else {
                tracing::debug!(generation, "Discarded results for an abandoned request");
            }
        });

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Storage;
    use crate::services::search_log::SearchLogger;

    fn form(category: Category) -> FormInput {
        FormInput {
            category,
            ..FormInput::default()
        }
    }

    fn item() -> RecommendationItem {
        RecommendationItem::new(9, "Heat", Category::Movie, "d")
    }

    #[test]
    fn test_happy_path() {
        let mut flow = Flow::new();
        flow.select_mood(Mood::Happy).unwrap();
        assert_eq!(flow.state(), &FlowState::Form { mood: Mood::Happy });

        let (generation, prefs) = flow.submit(form(Category::Movie), Some(30)).unwrap();
        assert_eq!(prefs.mood, Mood::Happy);
        assert_eq!(prefs.user_age, Some(30));
        assert_eq!(flow.state().name(), "loading");

        assert!(flow.complete(generation, vec![item()]));
        match flow.state() {
            FlowState::Results { results, .. } => assert_eq!(results.len(), 1),
            other => panic!("unexpected state {:?}", other),
        }

        flow.reset();
        assert_eq!(flow.state(), &FlowState::Mood);
    }

    #[test]
    fn test_back_returns_to_mood() {
        let mut flow = Flow::new();
        flow.select_mood(Mood::Sad).unwrap();
        flow.back().unwrap();
        assert_eq!(flow.state(), &FlowState::Mood);
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut flow = Flow::new();
        assert!(matches!(
            flow.submit(form(Category::Book), None),
            Err(AppError::InvalidTransition { action: "submit", state: "mood" })
        ));
        assert!(flow.back().is_err());

        flow.select_mood(Mood::Chill).unwrap();
        assert!(flow.select_mood(Mood::Happy).is_err());
        assert_eq!(flow.state(), &FlowState::Form { mood: Mood::Chill });
    }

    #[test]
    fn test_completion_after_reset_is_discarded() {
        let mut flow = Flow::new();
        flow.select_mood(Mood::Chill).unwrap();
        let (generation, _) = flow.submit(form(Category::Anime), None).unwrap();

        flow.reset();
        assert!(!flow.complete(generation, vec![item()]));
        assert_eq!(flow.state(), &FlowState::Mood);
    }

    #[test]
    fn test_stale_completion_does_not_clobber_newer_request() {
        let mut flow = Flow::new();
        flow.select_mood(Mood::Chill).unwrap();
        let (first, _) = flow.submit(form(Category::Anime), None).unwrap();
        flow.reset();
        flow.select_mood(Mood::Happy).unwrap();
        let (second, _) = flow.submit(form(Category::Movie), None).unwrap();

        assert!(!flow.complete(first, vec![]));
        assert_eq!(flow.state().name(), "loading");
        assert!(flow.complete(second, vec![item()]));
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_value(FlowState::Form { mood: Mood::Chill }).unwrap();
        assert_eq!(json["step"], "form");
        assert_eq!(json["mood"], "chill");
    }

    fn controller() -> FlowController {
        let logger = SearchLogger::new(Storage::in_memory());
        let service = RecommendationService::new(None, logger, Duration::from_millis(800));
        FlowController::new(service, Duration::from_millis(1500))
    }

    #[tokio::test(start_paused = true)]
    async fn test_controller_end_to_end_mock_mode() {
        let controller = controller();
        controller.select_mood(Mood::Chill).await.unwrap();

        let state = controller.submit(form(Category::Anime), None).await.unwrap();
        assert_eq!(state.name(), "loading");

        tokio::time::sleep(Duration::from_millis(2400)).await;

        match controller.state().await {
            FlowState::Results { results, .. } => {
                assert_eq!(results.len(), 1);
                assert_eq!(results[0].title, "Cowboy Bebop");
            }
            other => panic!("expected results, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_controller_reset_while_loading() {
        let controller = controller();
        controller.select_mood(Mood::Happy).await.unwrap();
        controller.submit(form(Category::Movie), None).await.unwrap();

        assert_eq!(controller.reset().await, FlowState::Mood);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(controller.state().await, FlowState::Mood);
    }
}
