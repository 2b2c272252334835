//! Fixtures shared by the unit tests.

use std::sync::Arc;

use crate::catalog::Catalog;

/// Four shapes, three flavors, six toppings (one with no renderer), two textures.
pub const SAMPLE_CATALOG_JSON: &str = include_str!("../../fixtures/catalog.json");

/// The sample catalog, parsed. Parse failures surface as an empty catalog,
/// which every test relying on it will notice.
pub fn sample_catalog() -> Catalog {
    Catalog::from_json(SAMPLE_CATALOG_JSON).unwrap_or_default()
}

pub fn sample_catalog_arc() -> Arc<Catalog> {
    Arc::new(sample_catalog())
}
