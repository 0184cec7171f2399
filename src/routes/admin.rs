use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    services::analytics::{admin_stats, AdminStats},
    state::AppState,
};

pub async fn stats(State(state): State<AppState>) -> AppResult<Json<AdminStats>> {
    let users = state.sessions.users().await?;
    let history = state.search_log.history().await?;
    Ok(Json(admin_stats(&users, &history)))
}
