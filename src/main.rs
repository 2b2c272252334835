mod catalog_source;
mod config;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::ServiceConfig::from_env().expect("invalid service configuration");
    let source = catalog_source::from_config(&config).expect("catalog source init failed");

    // The storefront can still price a degraded catalog at the base fee, so a
    // failed first load starts the service with an empty catalog.
    let catalog = match source.load().await {
        Ok(catalog) => {
            tracing::info!(source = source.describe(), loaded = catalog.is_loaded(), "catalog loaded");
            catalog
        }
        Err(e) => {
            tracing::warn!(error = %e, source = source.describe(), "catalog load failed; starting empty");
            cake::Catalog::empty()
        }
    };

    let state = state::AppState::new(catalog, source, config.sessions);

    // Spawn background idle-session sweeper.
    let _sweeper = services::session::spawn_sweeper_task(state.clone());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "cakeshop listening");
    axum::serve(listener, app).await.expect("server failed");
}
