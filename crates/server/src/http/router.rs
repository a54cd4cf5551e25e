use super::handlers::{challenge, reviews};
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

const ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::PATCH];

fn build_cors(allowed_origins: &str) -> CorsLayer {
    let any = || {
        CorsLayer::new()
            .allow_methods(ALLOWED_METHODS)
            .allow_origin(Any)
            .allow_headers(Any)
    };

    if allowed_origins == "*" {
        return any();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS config is invalid or empty, falling back to allow ANY.");
        any()
    } else {
        tracing::info!("CORS enabled for origins: {:?}", origins);
        CorsLayer::new()
            .allow_methods(ALLOWED_METHODS)
            .allow_origin(origins)
            .allow_headers(Any)
    }
}

pub fn build_router(state: AppState, allowed_origins: &str) -> Router {
    Router::new()
        .route(
            "/rest/products/reviews",
            patch(reviews::update_review_message),
        )
        .route(
            "/rest/products/:id/reviews",
            get(reviews::list_reviews).put(reviews::create_review),
        )
        .route("/api/challenges", get(challenge::list_challenges))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(allowed_origins))
        .with_state(state)
}
