//! Route guards for the signed-in and admin areas.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{error::AppError, state::AppState};

/// Rejects requests without a current session
///
/// The session user is stored in the request extensions for handlers.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.sessions.current().await {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => AppError::Unauthorized.into_response(),
    }
}

/// Rejects requests unless the current session is an admin
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.sessions.current().await {
        Some(user) if user.is_admin() => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Some(user) => {
            tracing::warn!(user_id = %user.id, "Non-admin tried to reach an admin route");
            AppError::Forbidden.into_response()
        }
        None => AppError::Unauthorized.into_response(),
    }
}
