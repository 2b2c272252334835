use super::*;
use crate::state::test_helpers::test_app_state;

#[tokio::test]
async fn get_catalog_returns_current() {
    let state = test_app_state();
    let Json(catalog) = get_catalog(State(state)).await;
    assert!(catalog.is_loaded());
    assert_eq!(catalog.textures.len(), 2);
}

#[tokio::test]
async fn reload_reports_sessions_updated() {
    let state = test_app_state();
    session::create_session(&state, None, None).await.unwrap();
    let Json(body) = reload_catalog(State(state)).await.unwrap();
    assert_eq!(body, ReloadResponse { loaded: true, sessions_updated: 1 });
}
