//! Axum router configuration with middleware.
//!
//! All resource routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use std::time::Instant;

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Authors
        .route("/users/signup", post(handlers::author::signup))
        .route("/users/login", post(handlers::author::login))
        .route("/users", get(handlers::author::list_authors))
        .route(
            "/users/{id}",
            get(handlers::author::get_author)
                .put(handlers::author::update_author)
                .delete(handlers::author::delete_author),
        )
        // Articles
        .route(
            "/articles",
            get(handlers::article::list_articles).post(handlers::article::create_article),
        )
        .route(
            "/articles/{id}",
            get(handlers::article::get_article)
                .put(handlers::article::update_article)
                .delete(handlers::article::delete_article),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Greeting with pointers to the resource collections.
async fn welcome() -> axum::Json<ApiResponse<serde_json::Value>> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let resp = ApiResponse::success(
        serde_json::json!({"message": "Welcome to the Modart API"}),
        request_id,
        start.elapsed().as_millis() as u64,
    )
    .with_link("users", "/api/v1/users")
    .with_link("articles", "/api/v1/articles");

    axum::Json(resp)
}

/// GET /health - Liveness plus the storage backend in use.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "backend": state.backend.to_string(),
    }))
}
