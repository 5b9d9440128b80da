use axum::http::{header::CONTENT_TYPE, Method};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Activities
        .route("/activities", get(handlers::get_activities))
        .route("/activities", post(handlers::create_activity))
        // User preferences
        .route("/preferences", get(handlers::get_preferences))
        .route("/preferences/favorites", post(handlers::toggle_favorite))
        .route("/preferences/completed", post(handlers::toggle_completed))
        // Recommendations
        .route("/recommendations", post(handlers::recommend))
}
