//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The storefront calls these endpoints while a customer designs a cake: it
//! opens a session, streams edits, fetches the placement plan to render, and
//! finally submits a quote. All state lives in [`AppState`].

pub mod catalog;
pub mod quotes;
pub mod sessions;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/catalog", get(catalog::get_catalog))
        .route("/api/catalog/reload", post(catalog::reload_catalog))
        .route("/api/sessions", post(sessions::create_session))
        .route("/api/sessions/{id}", get(sessions::get_session).delete(sessions::delete_session))
        .route("/api/sessions/{id}/config", put(sessions::set_config))
        .route("/api/sessions/{id}/edits", post(sessions::apply_edit))
        .route("/api/sessions/{id}/undo", post(sessions::undo))
        .route("/api/sessions/{id}/redo", post(sessions::redo))
        .route("/api/sessions/{id}/reset", post(sessions::reset))
        .route("/api/sessions/{id}/plan", get(sessions::plan))
        .route("/api/sessions/{id}/quote", post(quotes::submit_quote))
        .route("/api/quotes/{id}", get(quotes::get_quote))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
