//! Editing session routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use cake::{CakeConfig, Edit, PlacementPlan};
use serde::Deserialize;
use uuid::Uuid;

use crate::services::session::{self, SessionError, SessionView};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionBody {
    pub config: Option<CakeConfig>,
    /// Fixes decor placement for reproducible renders.
    pub seed: Option<u64>,
}

pub(crate) fn session_error_to_status(err: SessionError) -> StatusCode {
    match err {
        SessionError::NotFound(_) => StatusCode::NOT_FOUND,
        SessionError::LimitReached(_) => StatusCode::SERVICE_UNAVAILABLE,
        SessionError::InvalidConfig(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// `POST /api/sessions` — open a session, optionally seeded.
pub async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionBody>>,
) -> Result<(StatusCode, Json<SessionView>), StatusCode> {
    let Json(body) = body.unwrap_or_default();
    let view = session::create_session(&state, body.config, body.seed)
        .await
        .map_err(session_error_to_status)?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /api/sessions/:id`
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, StatusCode> {
    session::get_session(&state, id)
        .await
        .map(Json)
        .map_err(session_error_to_status)
}

/// `DELETE /api/sessions/:id`
pub async fn delete_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, StatusCode> {
    session::delete_session(&state, id)
        .await
        .map_err(session_error_to_status)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/sessions/:id/config` — replace the whole configuration.
pub async fn set_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(config): Json<CakeConfig>,
) -> Result<Json<SessionView>, StatusCode> {
    session::set_config(&state, id, config)
        .await
        .map(Json)
        .map_err(session_error_to_status)
}

/// `POST /api/sessions/:id/edits` — apply one edit.
pub async fn apply_edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(edit): Json<Edit>,
) -> Result<Json<SessionView>, StatusCode> {
    session::apply_edit(&state, id, &edit)
        .await
        .map(Json)
        .map_err(session_error_to_status)
}

/// `POST /api/sessions/:id/undo`
pub async fn undo(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<SessionView>, StatusCode> {
    session::undo(&state, id)
        .await
        .map(Json)
        .map_err(session_error_to_status)
}

/// `POST /api/sessions/:id/redo`
pub async fn redo(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<SessionView>, StatusCode> {
    session::redo(&state, id)
        .await
        .map(Json)
        .map_err(session_error_to_status)
}

/// `POST /api/sessions/:id/reset`
pub async fn reset(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<SessionView>, StatusCode> {
    session::reset(&state, id)
        .await
        .map(Json)
        .map_err(session_error_to_status)
}

/// `GET /api/sessions/:id/plan` — placement plan for the renderer.
pub async fn plan(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<PlacementPlan>, StatusCode> {
    session::plan(&state, id)
        .await
        .map(Json)
        .map_err(session_error_to_status)
}

#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;
