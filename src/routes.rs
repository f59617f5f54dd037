// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{auth, feed, interaction, user},
    state::AppState,
};

/// Plain-text liveness banner for the hosting platform's health check.
async fn root() -> &'static str {
    "BeSocial backend is running"
}

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, posts, users) under `/api`.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (pool + config).
pub fn create_router(state: AppState) -> Router {
    // Cookie-less API, any origin may call it.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let post_routes = Router::new()
        .route("/", get(feed::list_posts).post(feed::create_post))
        .route("/{id}", get(feed::get_post))
        .route("/{id}/like", post(interaction::like_post))
        .route("/{id}/comment", post(interaction::create_comment));

    let user_routes = Router::new().route("/{id}", get(user::get_user).put(user::update_user));

    // Register/login sit directly under /api; posts and users get their own
    // sub-trees.
    let api_routes = auth_routes
        .nest("/posts", post_routes)
        .nest("/users", user_routes);

    Router::new()
        .route("/", get(root))
        .nest("/api", api_routes)
        // Global middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
