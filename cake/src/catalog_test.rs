use super::*;
use crate::test_support::sample_catalog;

// =============================================================
// Parsing
// =============================================================

#[test]
fn from_json_groups_by_kind() {
    let catalog = sample_catalog();
    assert_eq!(catalog.shapes.len(), 4);
    assert_eq!(catalog.flavors.len(), 3);
    assert_eq!(catalog.frostings.len(), 2);
    assert_eq!(catalog.sizes.len(), 2);
    assert_eq!(catalog.heights.len(), 2);
    assert_eq!(catalog.textures.len(), 2);
}

#[test]
fn toppers_and_decorations_share_topping_list() {
    let catalog = sample_catalog();
    let names: Vec<&str> = catalog.topping_names().collect();
    assert_eq!(names, vec!["Sprinkles", "Cherries", "Macarons", "Gold Flakes", "Pearl Border", "Sparkler"]);
}

#[test]
fn from_json_rejects_malformed_document() {
    let result = Catalog::from_json("{\"not\": \"an array\"}");
    assert!(matches!(result, Err(CatalogError::Parse(_))));
}

#[test]
fn from_json_rejects_unknown_kind() {
    let raw = r#"[{"id": "a", "name": "Glitter", "type": "Sparkle", "priceModifier": 1}]"#;
    assert!(Catalog::from_json(raw).is_err());
}

#[test]
fn missing_price_and_metadata_default() {
    let raw = r#"[{"id": "a", "name": "Plain", "type": "Texture"}]"#;
    let catalog = Catalog::from_json(raw).unwrap();
    let texture = catalog.texture("Plain").unwrap();
    assert!(texture.price_modifier.abs() < f64::EPSILON);
    assert_eq!(texture.metadata, AssetMetadata::default());
}

#[test]
fn asset_serde_uses_camel_case_wire_names() {
    let catalog = sample_catalog();
    let cherries = catalog.topping("Cherries").unwrap();
    let json = serde_json::to_value(cherries).unwrap();
    assert_eq!(json["type"], "Topper");
    assert_eq!(json["priceModifier"], 5.0);
    assert_eq!(json["metadata"]["isCountable"], true);
}

// =============================================================
// Lookups
// =============================================================

#[test]
fn is_loaded_requires_shapes_and_flavors() {
    assert!(sample_catalog().is_loaded());
    assert!(!Catalog::empty().is_loaded());

    let mut no_flavors = sample_catalog();
    no_flavors.flavors.clear();
    assert!(!no_flavors.is_loaded());
}

#[test]
fn countability_defaults_to_false() {
    let catalog = sample_catalog();
    assert!(catalog.is_countable("Cherries"));
    assert!(!catalog.is_countable("Sprinkles"));
    assert!(!catalog.is_countable("Gold Flakes"));
    assert!(!catalog.is_countable("Nonexistent"));
}

#[test]
fn flavor_and_frosting_lookup_ignore_case() {
    let catalog = sample_catalog();
    assert_eq!(catalog.flavor_color("red velvet"), Some("#8B0000"));
    assert_eq!(catalog.frosting_color("GANACHE"), Some("#3D1F10"));
}

#[test]
fn topping_and_texture_lookup_are_exact() {
    let catalog = sample_catalog();
    assert!(catalog.topping("cherries").is_none());
    assert_eq!(catalog.topping_color("Cherries"), Some("#C21807"));
    assert_eq!(catalog.texture_url("Ruffles"), Some("/textures/ruffles.png"));
    assert_eq!(catalog.texture_url("ruffles"), None);
}

#[test]
fn unknown_names_resolve_to_none() {
    let catalog = sample_catalog();
    assert_eq!(catalog.flavor_color("Durian"), None);
    assert_eq!(catalog.frosting_color("Fondant"), None);
    assert_eq!(catalog.texture_url("Smooth"), None);
}
