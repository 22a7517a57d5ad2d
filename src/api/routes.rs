use axum::{
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Movie nights
        .route("/nights", post(handlers::create_night))
        .route("/nights", get(handlers::list_nights))
        .route("/nights/:id", get(handlers::get_night))
        .route("/nights/:id", patch(handlers::rename_night))
        .route("/nights/:id", delete(handlers::delete_night))
        .route("/nights/by-code/:code", get(handlers::get_night_by_code))
        // Voting lifecycle
        .route("/nights/:id/candidates", post(handlers::add_candidate))
        .route(
            "/nights/:id/candidates/:movie_id",
            delete(handlers::remove_candidate),
        )
        .route("/nights/:id/start", post(handlers::start_voting))
        .route("/nights/:id/votes", post(handlers::cast_vote))
        .route("/nights/:id/finish", post(handlers::finish_voting))
        .route("/nights/:id/reopen", post(handlers::reopen_voting))
        // Catalog
        .route("/movies/search", get(handlers::search_movies))
        .route("/movies/:id", get(handlers::get_movie))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
