pub mod auth;
pub mod comments;
pub mod error;
pub mod middleware;
pub mod moderation;
pub mod news;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::auth::AppState;

/// Assemble the full application router. Lives in the lib (rather than the
/// server binary) so integration tests can drive the real route table.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/news", get(news::home))
        .with_state(state.clone());

    // Detail is readable by anyone; authentication only decides whether the
    // comment form shows up in the response.
    let detail_route = Router::new()
        .route("/news/{news_id}", get(news::detail))
        .layer(from_fn_with_state(state.clone(), middleware::optional_auth))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/news/{news_id}/comments", post(comments::create_comment))
        .route(
            "/comments/{comment_id}",
            post(comments::edit_comment).delete(comments::delete_comment),
        )
        .layer(from_fn_with_state(state.clone(), middleware::require_auth))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(detail_route)
        .merge(protected_routes)
}
