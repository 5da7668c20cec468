//! Route table.

use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post};
use tower_http::trace::TraceLayer;

use crate::auth::require_admin;
use crate::handlers;
use crate::state::AppState;

/// Build the application router over the given state.
pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/add_document", post(handlers::add_document))
        .route("/update_document", post(handlers::update_document))
        .route("/delete_document", delete(handlers::delete_document))
        .route("/reload_data", post(handlers::reload_data))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/query", get(handlers::query))
        .route("/feedback", post(handlers::feedback))
        .route("/context", post(handlers::context))
        .route("/summarize", post(handlers::summarize))
        .route("/compare", post(handlers::compare))
        .route("/translate", post(handlers::translate))
        .route("/multi_turn", post(handlers::multi_turn))
        .route("/new_session", get(handlers::new_session))
        .route("/generate_questions", post(handlers::generate_questions))
        .route("/paraphrase", post(handlers::paraphrase))
        .route("/extract_entities", post(handlers::extract_entities))
        .route("/health", get(handlers::health))
        .nest("/admin", admin)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
