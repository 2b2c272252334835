//! Editing sessions: create, edit, undo/redo, plan, and expire.
//!
//! DESIGN
//! ======
//! Every operation resolves the session handle under the map's read lock,
//! releases the map, then works under the session's own mutex. An edit is
//! therefore atomic per session: the history push and the price it implies
//! are observed together or not at all.
//!
//! TRADE-OFFS
//! ==========
//! The idle sweep skips sessions whose mutex is held. A session that is
//! mid-request is by definition not idle, and waiting on it would stall the
//! sweep behind slow clients.

use std::sync::Arc;
use std::time::Duration;

use cake::{CakeConfig, ConfigEditor, ConfigError, Edit, PlacementPlan, PlacementPlanner, PriceBreakdown};
use rand::Rng;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog_source::CatalogSourceError;
use crate::state::{AppState, EditSession, SessionHandle};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(Uuid),
    #[error("session limit reached ({0} live sessions)")]
    LimitReached(usize),
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Snapshot of a session returned by every session operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    pub config: CakeConfig,
    pub price: u32,
    pub breakdown: PriceBreakdown,
    pub can_undo: bool,
    pub can_redo: bool,
    pub history_len: usize,
    pub cursor: usize,
    /// Whether the request that produced this view changed the configuration.
    pub changed: bool,
}

impl SessionView {
    fn of(session: &EditSession, changed: bool) -> Self {
        let editor = &session.editor;
        Self {
            id: session.id,
            config: editor.config().clone(),
            price: editor.price(),
            breakdown: editor.breakdown(),
            can_undo: editor.can_undo(),
            can_redo: editor.can_redo(),
            history_len: editor.history_len(),
            cursor: editor.cursor(),
            changed,
        }
    }
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Start a session from the current catalog. A supplied configuration is
/// validated first; a supplied seed makes decor placement reproducible.
///
/// # Errors
///
/// Returns `InvalidConfig` for a malformed initial configuration and
/// `LimitReached` when the live-session cap is hit.
pub async fn create_session(
    state: &AppState,
    initial: Option<CakeConfig>,
    seed: Option<u64>,
) -> Result<SessionView, SessionError> {
    if let Some(config) = &initial {
        config.validate()?;
    }

    let mut sessions = state.sessions.write().await;
    if sessions.len() >= state.limits.max_sessions {
        warn!(max = state.limits.max_sessions, "session limit reached");
        return Err(SessionError::LimitReached(sessions.len()));
    }

    // Read under the map lock: a concurrent reload either sees this session
    // when it walks the map or has already swapped the catalog read here.
    let catalog = state.current_catalog().await;
    let id = Uuid::new_v4();
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let session = EditSession::new(id, ConfigEditor::new(catalog, initial), PlacementPlanner::new(seed));
    let view = SessionView::of(&session, true);
    sessions.insert(id, Arc::new(Mutex::new(session)));
    info!(%id, seed, "session created");
    Ok(view)
}

/// # Errors
///
/// Returns `NotFound` if the session does not exist.
pub async fn delete_session(state: &AppState, id: Uuid) -> Result<(), SessionError> {
    if state.sessions.write().await.remove(&id).is_none() {
        return Err(SessionError::NotFound(id));
    }
    info!(%id, "session deleted");
    Ok(())
}

/// Remove sessions untouched since `now - idle`. Returns how many were removed.
pub async fn sweep_idle(state: &AppState, now: Instant) -> usize {
    let idle = state.limits.idle;
    let expired: Vec<Uuid> = {
        let sessions = state.sessions.read().await;
        sessions
            .iter()
            .filter_map(|(id, handle)| {
                let session = handle.try_lock().ok()?;
                (now.saturating_duration_since(session.last_seen) >= idle).then_some(*id)
            })
            .collect()
    };
    if expired.is_empty() {
        return 0;
    }

    let mut sessions = state.sessions.write().await;
    for id in &expired {
        sessions.remove(id);
    }
    info!(count = expired.len(), remaining = sessions.len(), "swept idle sessions");
    expired.len()
}

/// Spawn the idle-session sweeper. Returns a handle for shutdown.
pub fn spawn_sweeper_task(state: AppState) -> JoinHandle<()> {
    let every: Duration = state.limits.sweep_every;
    info!(every_secs = every.as_secs(), idle_secs = state.limits.idle.as_secs(), "session sweeper configured");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            sweep_idle(&state, Instant::now()).await;
        }
    })
}

/// Reload the catalog from its source and push it into every live session.
/// On failure the previous catalog stays in place. Returns the number of
/// sessions updated.
///
/// # Errors
///
/// Returns the source's error if the catalog cannot be loaded.
pub async fn refresh_catalog(state: &AppState) -> Result<usize, CatalogSourceError> {
    let catalog = match state.catalog_source.load().await {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            warn!(error = %e, source = state.catalog_source.describe(), "catalog reload failed; keeping previous");
            return Err(e);
        }
    };
    // Swap before walking the map; `create_session` reads the catalog while
    // holding the map, so no session can miss this reload.
    *state.catalog.write().await = catalog.clone();

    let handles: Vec<SessionHandle> = state.sessions.read().await.values().cloned().collect();
    for handle in &handles {
        handle.lock().await.editor.set_catalog(catalog.clone());
    }
    info!(sessions = handles.len(), loaded = catalog.is_loaded(), "catalog reloaded");
    Ok(handles.len())
}

// =============================================================================
// EDITING
// =============================================================================

async fn handle(state: &AppState, id: Uuid) -> Result<SessionHandle, SessionError> {
    state
        .sessions
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or(SessionError::NotFound(id))
}

/// Run `f` against the session's editor under its lock.
async fn with_editor<F>(state: &AppState, id: Uuid, f: F) -> Result<SessionView, SessionError>
where
    F: FnOnce(&mut ConfigEditor) -> Result<bool, SessionError>,
{
    let handle = handle(state, id).await?;
    let mut session = handle.lock().await;
    session.touch();
    let changed = f(&mut session.editor)?;
    Ok(SessionView::of(&session, changed))
}

/// # Errors
///
/// Returns `NotFound` if the session does not exist.
pub async fn get_session(state: &AppState, id: Uuid) -> Result<SessionView, SessionError> {
    with_editor(state, id, |_| Ok(false)).await
}

/// Replace the whole configuration, as one undoable step.
///
/// # Errors
///
/// Returns `NotFound` or `InvalidConfig`.
pub async fn set_config(state: &AppState, id: Uuid, config: CakeConfig) -> Result<SessionView, SessionError> {
    with_editor(state, id, |editor| Ok(editor.try_set_config(config)?)).await
}

/// # Errors
///
/// Returns `NotFound` if the session does not exist.
pub async fn apply_edit(state: &AppState, id: Uuid, edit: &Edit) -> Result<SessionView, SessionError> {
    with_editor(state, id, |editor| Ok(editor.apply(edit))).await
}

/// # Errors
///
/// Returns `NotFound` if the session does not exist.
pub async fn undo(state: &AppState, id: Uuid) -> Result<SessionView, SessionError> {
    with_editor(state, id, |editor| Ok(editor.undo())).await
}

/// # Errors
///
/// Returns `NotFound` if the session does not exist.
pub async fn redo(state: &AppState, id: Uuid) -> Result<SessionView, SessionError> {
    with_editor(state, id, |editor| Ok(editor.redo())).await
}

/// # Errors
///
/// Returns `NotFound` if the session does not exist.
pub async fn reset(state: &AppState, id: Uuid) -> Result<SessionView, SessionError> {
    with_editor(state, id, |editor| {
        editor.reset();
        Ok(true)
    })
    .await
}

/// Placement plan for the session's current configuration.
///
/// # Errors
///
/// Returns `NotFound` if the session does not exist.
pub async fn plan(state: &AppState, id: Uuid) -> Result<PlacementPlan, SessionError> {
    let handle = handle(state, id).await?;
    let mut session = handle.lock().await;
    session.touch();
    let EditSession { editor, planner, .. } = &mut *session;
    Ok(planner.plan(editor.config(), editor.catalog()))
}

/// Current configuration and price, read atomically.
///
/// # Errors
///
/// Returns `NotFound` if the session does not exist.
pub async fn snapshot(state: &AppState, id: Uuid) -> Result<(CakeConfig, u32), SessionError> {
    let handle = handle(state, id).await?;
    let mut session = handle.lock().await;
    session.touch();
    Ok((session.editor.config().clone(), session.editor.price()))
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
