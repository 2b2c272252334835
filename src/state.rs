//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the current catalog, the live editing sessions, and submitted
//! quotes. Each session sits behind its own mutex so one session's edit,
//! history push, and price recomputation happen as a unit while other
//! sessions proceed independently.

use std::collections::HashMap;
use std::sync::Arc;

use cake::{Catalog, ConfigEditor, PlacementPlanner};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use uuid::Uuid;

use crate::catalog_source::CatalogSource;
use crate::config::SessionLimits;
use crate::services::quote::Quote;

// =============================================================================
// EDIT SESSION
// =============================================================================

/// One customer's design in progress.
pub struct EditSession {
    pub id: Uuid,
    pub editor: ConfigEditor,
    pub planner: PlacementPlanner,
    /// Last time a request touched this session.
    pub last_seen: Instant,
}

impl EditSession {
    #[must_use]
    pub fn new(id: Uuid, editor: ConfigEditor, planner: PlacementPlanner) -> Self {
        Self { id, editor, planner, last_seen: Instant::now() }
    }

    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }
}

pub type SessionHandle = Arc<Mutex<EditSession>>;

// =============================================================================
// APP STATE
// =============================================================================

/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    /// Catalog new sessions start from. Swapped wholesale on reload.
    pub catalog: Arc<RwLock<Arc<Catalog>>>,
    pub catalog_source: Arc<dyn CatalogSource>,
    pub sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
    pub quotes: Arc<RwLock<HashMap<Uuid, Quote>>>,
    pub limits: SessionLimits,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Catalog, catalog_source: Arc<dyn CatalogSource>, limits: SessionLimits) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Arc::new(catalog))),
            catalog_source,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            quotes: Arc::new(RwLock::new(HashMap::new())),
            limits,
        }
    }

    /// Snapshot of the current catalog.
    pub async fn current_catalog(&self) -> Arc<Catalog> {
        self.catalog.read().await.clone()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::catalog_source::StaticCatalogSource;

    pub const CATALOG_JSON: &str = include_str!("../fixtures/catalog.json");

    #[must_use]
    pub fn sample_catalog() -> Catalog {
        Catalog::from_json(CATALOG_JSON).expect("fixture catalog should parse")
    }

    /// App state over the fixture catalog with default limits.
    #[must_use]
    pub fn test_app_state() -> AppState {
        test_app_state_with_limits(SessionLimits::default())
    }

    #[must_use]
    pub fn test_app_state_with_limits(limits: SessionLimits) -> AppState {
        let catalog = sample_catalog();
        AppState::new(catalog.clone(), Arc::new(StaticCatalogSource::new(catalog)), limits)
    }
}
