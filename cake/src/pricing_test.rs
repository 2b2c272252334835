use super::*;
use crate::catalog::Catalog;
use crate::config::CakeShape;
use crate::test_support::sample_catalog;

fn table() -> PriceTable {
    PriceTable::from_catalog(&sample_catalog())
}

fn base_config() -> CakeConfig {
    CakeConfig::default_for(&sample_catalog())
}

// =============================================================
// Worked examples
// =============================================================

#[test]
fn default_config_prices_at_660() {
    assert_eq!(table().quote(&base_config()), 660);
}

#[test]
fn second_identical_tier_adds_360() {
    let config = base_config().with_tier_added();
    assert_eq!(table().quote(&config), 1020);
}

#[test]
fn boolean_topping_adds_its_cost_once() {
    let on = base_config().with_topping_toggled("Sprinkles");
    assert_eq!(table().quote(&on), 680);
    let off = on.with_topping_toggled("Sprinkles");
    assert_eq!(table().quote(&off), 660);
}

#[test]
fn message_fee_is_flat() {
    let short = base_config().with_message_text("Hi");
    let long = base_config().with_message_text("Happy birthday to the best baker in town");
    assert_eq!(table().quote(&short), 710);
    assert_eq!(table().quote(&long), 710);
    assert_eq!(table().quote(&short.with_message_text("")), 660);
}

#[test]
fn countable_topping_scales_by_count() {
    let config = base_config().with_topping_adjusted("Cherries", 4);
    assert_eq!(table().quote(&config), 660 + 4 * 5);
}

// =============================================================
// Lookups
// =============================================================

#[test]
fn shape_multiplier_scales_volume_only() {
    let config = base_config().with_shape(CakeShape::Square).with_tier_flavor(0, "Chocolate");
    // 300 + 6*4*15*1.2 + 25 = 757
    assert_eq!(table().quote(&config), 757);
}

#[test]
fn flavor_lookup_ignores_case() {
    let config = base_config().with_tier_flavor(0, "red velvet");
    assert_eq!(table().quote(&config), 700);
}

#[test]
fn height_surcharge_matches_by_value() {
    let config = base_config().with_tier_height(0, 6.0);
    // 300 + 6*6*15 + 30 = 870
    assert_eq!(table().quote(&config), 870);
}

#[test]
fn texture_cost_is_added() {
    let config = base_config().with_texture("Ruffles");
    assert_eq!(table().quote(&config), 705);
}

#[test]
fn unknown_names_use_neutral_defaults() {
    let config = base_config().with_tier_flavor(0, "Durian").with_texture("Marbled");
    assert_eq!(table().quote(&config), 660);
    assert!((table().shape_multiplier("hexagon") - 1.0).abs() < f64::EPSILON);
    assert!(table().topping_cost("Unicorn Horn").abs() < f64::EPSILON);
}

#[test]
fn fractional_totals_round_up() {
    let rect = base_config().with_shape(CakeShape::Rectangle).with_tier_width(0, 5.1);
    // 300 + 5.1*4*15*1.3 = 697.8
    assert_eq!(table().quote(&rect), 698);
}

// =============================================================
// Degraded catalog
// =============================================================

#[test]
fn empty_catalog_prices_at_base_fee() {
    let table = PriceTable::from_catalog(&Catalog::empty());
    let config = base_config().with_tier_added().with_message_text("Hi");
    assert!(!table.is_loaded());
    assert_eq!(table.quote(&config), 300);
}

#[test]
fn catalog_without_flavors_prices_at_base_fee() {
    let mut catalog = sample_catalog();
    catalog.flavors.clear();
    assert_eq!(PriceTable::from_catalog(&catalog).quote(&base_config()), 300);
}

// =============================================================
// Properties
// =============================================================

#[test]
fn pricing_is_deterministic() {
    let config = base_config().with_tier_added().with_topping_adjusted("Macarons", 3);
    let a = table().quote(&config);
    let b = PriceTable::from_catalog(&sample_catalog()).quote(&config);
    assert_eq!(a, b);
}

#[test]
fn price_is_monotone_in_tiers_volume_and_counts() {
    let table = table();
    let mut config = base_config();
    let mut last = table.quote(&config);
    for _ in 0..4 {
        config = config.with_tier_added();
        let next = table.quote(&config);
        assert!(next >= last);
        last = next;
    }
    for w in [7.0, 8.0, 10.0] {
        config = config.with_tier_width(0, w);
        let next = table.quote(&config);
        assert!(next >= last);
        last = next;
    }
    for _ in 0..13 {
        config = config.with_topping_adjusted("Cherries", 1);
        let next = table.quote(&config);
        assert!(next >= last);
        last = next;
    }
}

#[test]
fn breakdown_sums_to_total() {
    let config = base_config()
        .with_tier_added()
        .with_topping_toggled("Sprinkles")
        .with_message_text("Hi")
        .with_texture("Ruffles");
    let b = table().breakdown(&config);
    assert!((b.base - 300.0).abs() < f64::EPSILON);
    assert!((b.tiers - 720.0).abs() < 1e-9);
    assert!((b.toppings - 20.0).abs() < 1e-9);
    assert!((b.message - 50.0).abs() < f64::EPSILON);
    assert!((b.texture - 45.0).abs() < f64::EPSILON);
    assert_eq!(b.total, 1135);
}

#[test]
fn negative_totals_clamp_to_zero() {
    let raw = r#"[
      {"id": "s", "name": "Round", "type": "Shape", "metadata": {"multiplier": 1.0}},
      {"id": "f", "name": "Vanilla", "type": "Flavor", "priceModifier": -5000}
    ]"#;
    let table = PriceTable::from_catalog(&Catalog::from_json(raw).unwrap());
    assert_eq!(table.quote(&base_config()), 0);
}
