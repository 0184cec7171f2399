use axum::{
    extract::State,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware, require_admin, require_session},
    state::AppState,
};

pub mod admin;
pub mod auth;
pub mod flow;
pub mod recommendations;
pub mod watchlist;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session));

    let signed_in = Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route("/flow", get(flow::state))
        .route("/flow/mood", post(flow::select_mood))
        .route("/flow/back", post(flow::back))
        .route("/flow/submit", post(flow::submit))
        .route("/flow/reset", post(flow::reset))
        .route("/watchlist", get(watchlist::list).post(watchlist::save))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    let admin = Router::new()
        .route("/admin/stats", get(admin::stats))
        .route_layer(from_fn_with_state(state, require_admin));

    public.merge(signed_in).merge(admin)
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "storage": state.storage.backend(),
            "mockMode": state.recommendations.is_mock(),
        })),
    )
}
