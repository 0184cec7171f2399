use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::{
    error::AppResult,
    models::RecommendationItem,
    services::SaveOutcome,
    state::AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub outcome: SaveOutcome,
    pub message: String,
    pub watchlist_size: usize,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<RecommendationItem>>> {
    Ok(Json(state.watchlist.list().await?))
}

/// Saves an item; 201 when added, 200 when it was already there
pub async fn save(
    State(state): State<AppState>,
    Json(item): Json<RecommendationItem>,
) -> AppResult<(StatusCode, Json<SaveResponse>)> {
    let title = item.title.clone();
    let (outcome, watchlist_size) = state.watchlist.save(item).await?;

    let (status, message) = match outcome {
        SaveOutcome::Added => (
            StatusCode::CREATED,
            format!("Saved \"{}\" to your watchlist!", title),
        ),
        SaveOutcome::AlreadyPresent => (
            StatusCode::OK,
            format!("\"{}\" is already in your watchlist.", title),
        ),
    };

    Ok((
        status,
        Json(SaveResponse {
            outcome,
            message,
            watchlist_size,
        }),
    ))
}
