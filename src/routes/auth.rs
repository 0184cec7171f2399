use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::SessionUser,
    services::NewUser,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Creates an account and signs it in
pub async fn signup(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<NewUser>,
) -> AppResult<(StatusCode, Json<SessionUser>)> {
    let user = state.sessions.signup(request).await.map_err(|e| {
        tracing::info!(request_id = %request_id, error = %e, "Signup rejected");
        e
    })?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<SessionUser>> {
    let user = state
        .sessions
        .login(&request.email, &request.password)
        .await
        .map_err(|e| {
            tracing::info!(request_id = %request_id, error = %e, "Login rejected");
            e
        })?;
    Ok(Json(user))
}

/// Ends the session and abandons any flow in progress
pub async fn logout(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.sessions.logout().await?;
    state.flow.reset().await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn session(State(state): State<AppState>) -> AppResult<Json<SessionUser>> {
    state
        .sessions
        .current()
        .await
        .map(Json)
        .ok_or(AppError::Unauthorized)
}
