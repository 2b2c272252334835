//! Quote routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::routes::sessions::session_error_to_status;
use crate::services::quote::{self, Quote, QuoteError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuoteBody {
    pub snapshot_image: Option<String>,
}

pub(crate) fn quote_error_to_status(err: QuoteError) -> StatusCode {
    match err {
        QuoteError::NotFound(_) => StatusCode::NOT_FOUND,
        QuoteError::SnapshotTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        QuoteError::LimitReached(_) => StatusCode::SERVICE_UNAVAILABLE,
        QuoteError::Session(e) => session_error_to_status(e),
    }
}

/// `POST /api/sessions/:id/quote` — freeze the current design into a quote.
pub async fn submit_quote(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    body: Option<Json<SubmitQuoteBody>>,
) -> Result<(StatusCode, Json<Quote>), StatusCode> {
    let Json(body) = body.unwrap_or_default();
    let quote = quote::submit_quote(&state, session_id, body.snapshot_image)
        .await
        .map_err(quote_error_to_status)?;
    Ok((StatusCode::CREATED, Json(quote)))
}

/// `GET /api/quotes/:id`
pub async fn get_quote(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Quote>, StatusCode> {
    quote::get_quote(&state, id)
        .await
        .map(Json)
        .map_err(quote_error_to_status)
}

#[cfg(test)]
#[path = "quotes_test.rs"]
mod tests;
