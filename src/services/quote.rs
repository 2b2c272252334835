//! Quote submission.
//!
//! A quote freezes a session's current configuration together with its
//! estimated price and an optional rendered snapshot. Quotes are kept in
//! memory, outlive the session they came from, and are capped in number.

use std::time::{SystemTime, UNIX_EPOCH};

use cake::CakeConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::services::session::{self, SessionError};
use crate::state::AppState;

/// Largest accepted snapshot payload (a data URL), in bytes. Stays under
/// the router's default request body limit.
pub const MAX_SNAPSHOT_BYTES: usize = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("quote not found: {0}")]
    NotFound(Uuid),
    #[error("snapshot too large: {0} bytes")]
    SnapshotTooLarge(usize),
    #[error("quote limit reached ({0} stored quotes)")]
    LimitReached(usize),
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,
    pub session_id: Uuid,
    pub config: CakeConfig,
    pub estimated_price: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_image: Option<String>,
    pub created_at_ms: i64,
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

/// Freeze the session's current design into a quote.
///
/// # Errors
///
/// Returns `SnapshotTooLarge`, `LimitReached` when the stored-quote cap is
/// hit, or the session's `NotFound`.
pub async fn submit_quote(
    state: &AppState,
    session_id: Uuid,
    snapshot_image: Option<String>,
) -> Result<Quote, QuoteError> {
    if let Some(image) = &snapshot_image {
        if image.len() > MAX_SNAPSHOT_BYTES {
            return Err(QuoteError::SnapshotTooLarge(image.len()));
        }
    }

    let (config, estimated_price) = session::snapshot(state, session_id).await?;
    let quote = Quote {
        id: Uuid::new_v4(),
        session_id,
        config,
        estimated_price,
        snapshot_image,
        created_at_ms: now_ms(),
    };

    let mut quotes = state.quotes.write().await;
    if quotes.len() >= state.limits.max_quotes {
        warn!(max = state.limits.max_quotes, "quote limit reached");
        return Err(QuoteError::LimitReached(quotes.len()));
    }
    quotes.insert(quote.id, quote.clone());
    drop(quotes);
    info!(quote_id = %quote.id, %session_id, price = estimated_price, "quote submitted");
    Ok(quote)
}

/// # Errors
///
/// Returns `NotFound` if no quote has this id.
pub async fn get_quote(state: &AppState, id: Uuid) -> Result<Quote, QuoteError> {
    state
        .quotes
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or(QuoteError::NotFound(id))
}

#[cfg(test)]
#[path = "quote_test.rs"]
mod tests;
