use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_with_only_catalog_path() {
    let config = ServiceConfig::from_lookup(lookup(&[("CATALOG_PATH", "assets.json")])).unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.catalog, CatalogLocation::File(PathBuf::from("assets.json")));
    assert_eq!(config.catalog_timeout, Duration::from_secs(DEFAULT_CATALOG_TIMEOUT_SECS));
    assert_eq!(config.sessions, SessionLimits::default());
}

#[test]
fn catalog_url_is_trimmed() {
    let config = ServiceConfig::from_lookup(lookup(&[("CATALOG_URL", "https://shop.test/api/assets/")])).unwrap();
    assert_eq!(config.catalog, CatalogLocation::Url("https://shop.test/api/assets".into()));
}

#[test]
fn missing_catalog_source_is_an_error() {
    let err = ServiceConfig::from_lookup(lookup(&[("PORT", "8080")])).unwrap_err();
    assert_eq!(err, ConfigLoadError::MissingCatalogSource);
}

#[test]
fn blank_catalog_source_counts_as_missing() {
    let err = ServiceConfig::from_lookup(lookup(&[("CATALOG_PATH", "  ")])).unwrap_err();
    assert_eq!(err, ConfigLoadError::MissingCatalogSource);
}

#[test]
fn both_catalog_sources_is_an_error() {
    let err = ServiceConfig::from_lookup(lookup(&[("CATALOG_PATH", "a.json"), ("CATALOG_URL", "http://x")])).unwrap_err();
    assert_eq!(err, ConfigLoadError::AmbiguousCatalogSource);
}

#[test]
fn overrides_are_parsed() {
    let config = ServiceConfig::from_lookup(lookup(&[
        ("CATALOG_PATH", "a.json"),
        ("PORT", "8080"),
        ("CATALOG_TIMEOUT_SECS", "3"),
        ("SESSION_IDLE_SECS", "90"),
        ("SESSION_SWEEP_SECS", "0"),
        ("MAX_SESSIONS", "5"),
        ("MAX_QUOTES", "7"),
    ]))
    .unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.catalog_timeout, Duration::from_secs(3));
    assert_eq!(config.sessions.idle, Duration::from_secs(90));
    assert_eq!(config.sessions.sweep_every, Duration::from_secs(1));
    assert_eq!(config.sessions.max_sessions, 5);
    assert_eq!(config.sessions.max_quotes, 7);
}

#[test]
fn unparsable_number_names_the_key() {
    let err = ServiceConfig::from_lookup(lookup(&[("CATALOG_PATH", "a.json"), ("PORT", "eighty")])).unwrap_err();
    assert_eq!(err, ConfigLoadError::Invalid { key: "PORT", value: "eighty".into() });
}
