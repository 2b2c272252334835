//! Catalog routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use cake::Catalog;
use serde::Serialize;

use crate::services::session;
use crate::state::AppState;

/// `GET /api/catalog` — the catalog new sessions start from.
pub async fn get_catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.current_catalog().await.as_ref().clone())
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ReloadResponse {
    pub loaded: bool,
    pub sessions_updated: usize,
}

/// `POST /api/catalog/reload` — refetch the catalog and reconcile live sessions.
pub async fn reload_catalog(State(state): State<AppState>) -> Result<Json<ReloadResponse>, StatusCode> {
    let sessions_updated = session::refresh_catalog(&state)
        .await
        .map_err(|_| StatusCode::BAD_GATEWAY)?;
    let loaded = state.current_catalog().await.is_loaded();
    Ok(Json(ReloadResponse { loaded, sessions_updated }))
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
