use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{Mood, SessionUser},
    services::{FlowState, FormInput},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SelectMoodRequest {
    pub mood: Mood,
}

pub async fn state(State(state): State<AppState>) -> Json<FlowState> {
    Json(state.flow.state().await)
}

pub async fn select_mood(
    State(state): State<AppState>,
    Json(request): Json<SelectMoodRequest>,
) -> AppResult<Json<FlowState>> {
    Ok(Json(state.flow.select_mood(request.mood).await?))
}

pub async fn back(State(state): State<AppState>) -> AppResult<Json<FlowState>> {
    Ok(Json(state.flow.back().await?))
}

/// Submits the preference form. Results arrive later; poll `GET /flow`
pub async fn submit(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(form): Json<FormInput>,
) -> AppResult<(StatusCode, Json<FlowState>)> {
    let flow_state = state.flow.submit(form, user.age).await?;
    Ok((StatusCode::ACCEPTED, Json(flow_state)))
}

pub async fn reset(State(state): State<AppState>) -> Json<FlowState> {
    Json(state.flow.reset().await)
}
