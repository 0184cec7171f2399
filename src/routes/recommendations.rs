use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use crate::{
    middleware::RequestId,
    models::{Mood, Preferences, RecommendationItem, SessionUser},
    services::FormInput,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub mood: Mood,
    #[serde(flatten)]
    pub form: FormInput,
}

/// Handler for one-shot recommendations, outside the guided flow
///
/// The user's age comes from the session, never from the request body.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> Json<Vec<RecommendationItem>> {
    let preferences = Preferences {
        mood: request.mood,
        category: request.form.category,
        favorites: request.form.favorites,
        user_age: user.age,
        critically_acclaimed: request.form.critically_acclaimed,
    };

    tracing::info!(
        request_id = %request_id,
        mood = %preferences.mood,
        category = %preferences.category,
        "Processing recommendation request"
    );

    let items = state.recommendations.get_recommendations(&preferences).await;

    tracing::info!(
        request_id = %request_id,
        results = items.len(),
        "Recommendations served"
    );

    Json(items)
}
