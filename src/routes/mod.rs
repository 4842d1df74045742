use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::db::GraphStore;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

pub mod games;
pub mod recommendations;
pub mod relationships;
pub mod users;

/// Shared application state
///
/// The store is injected behind the trait so tests can swap implementations;
/// nothing reaches for it through globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GraphStore>,
    pub config: Arc<Config>,
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/games", get(games::list).post(games::create))
        .route("/users", get(users::list).post(users::create))
        .route("/users/:id/games", get(users::games))
        .route(
            "/users/:id/games/:game_id/relationship",
            post(relationships::upsert).put(relationships::replace),
        )
        .route("/users/:id/recommendations", get(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
