#![allow(clippy::float_cmp)]

use super::*;
use crate::test_support::sample_catalog;

fn two_tier() -> CakeConfig {
    CakeConfig::default_for(&sample_catalog()).with_tier_added()
}

fn widths(config: &CakeConfig) -> Vec<f64> {
    config.layers.iter().map(|t| t.width).collect()
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_has_one_vanilla_tier() {
    let config = CakeConfig::default_for(&sample_catalog());
    assert_eq!(config.layers, vec![Tier { width: 6.0, height: 4.0, flavor: "Vanilla".into() }]);
    assert_eq!(config.shape, CakeShape::Round);
    assert_eq!(config.frosting_coverage, FrostingCoverage::Naked);
    assert!(config.message_config.text.is_empty());
}

#[test]
fn default_keys_toppings_by_countability() {
    let config = CakeConfig::default_for(&sample_catalog());
    assert_eq!(config.toppings.len(), 6);
    assert_eq!(config.toppings["Cherries"], ToppingValue::Count(0));
    assert_eq!(config.toppings["Sprinkles"], ToppingValue::Toggle(false));
}

#[test]
fn default_frosting_is_first_catalog_frosting() {
    assert_eq!(CakeConfig::default_for(&sample_catalog()).frosting, "Buttercream");
    assert_eq!(CakeConfig::default_for(&Catalog::empty()).frosting, DEFAULT_FROSTING);
}

#[test]
fn default_validates() {
    assert_eq!(CakeConfig::default_for(&sample_catalog()).validate(), Ok(()));
}

// =============================================================
// Shape names
// =============================================================

#[test]
fn shape_from_name_is_lenient() {
    assert_eq!(CakeShape::from_name("Heart"), CakeShape::Heart);
    assert_eq!(CakeShape::from_name(" square "), CakeShape::Square);
    assert_eq!(CakeShape::from_name("RECTANGLE"), CakeShape::Rectangle);
    assert_eq!(CakeShape::from_name("Hexagon"), CakeShape::Round);
}

#[test]
fn shape_serde_is_strict() {
    assert_eq!(serde_json::to_string(&CakeShape::Heart).unwrap(), "\"Heart\"");
    assert!(serde_json::from_str::<CakeShape>("\"Hexagon\"").is_err());
}

// =============================================================
// Tiers
// =============================================================

#[test]
fn add_tier_copies_top_tier() {
    let config = two_tier();
    assert_eq!(config.layers.len(), 2);
    assert_eq!(config.layers[1], config.layers[0]);
    assert_eq!(config.top_tier(), config.layers.get(1));
}

#[test]
fn add_tier_stops_at_five() {
    let mut config = CakeConfig::default_for(&sample_catalog());
    for _ in 0..10 {
        config = config.with_tier_added();
    }
    assert_eq!(config.layers.len(), MAX_TIERS);
}

#[test]
fn remove_tier_stops_at_one() {
    let config = two_tier().with_tier_removed().with_tier_removed().with_tier_removed();
    assert_eq!(config.layers.len(), MIN_TIERS);
}

#[test]
fn narrowing_bottom_tier_cascades_up() {
    let config = two_tier().with_tier_width(0, 4.0);
    assert_eq!(widths(&config), vec![4.0, 4.0]);
}

#[test]
fn widening_upper_tier_is_clamped_to_tier_below() {
    let config = two_tier().with_tier_width(1, 10.0);
    assert_eq!(widths(&config), vec![6.0, 6.0]);
}

#[test]
fn widening_bottom_tier_leaves_upper_tiers() {
    let config = two_tier().with_tier_width(0, 10.0);
    assert_eq!(widths(&config), vec![10.0, 6.0]);
}

#[test]
fn cascade_settles_across_many_tiers() {
    let mut config = CakeConfig::default_for(&sample_catalog()).with_tier_width(0, 12.0);
    for _ in 0..4 {
        config = config.with_tier_added();
    }
    let config = config
        .with_tier_width(1, 10.0)
        .with_tier_width(2, 8.0)
        .with_tier_width(0, 9.0)
        .with_tier_width(4, 11.0);
    let w = widths(&config);
    assert!(w.windows(2).all(|pair| pair[1] <= pair[0]), "not monotone: {w:?}");
    assert_eq!(w[0], 9.0);
}

#[test]
fn invalid_dimensions_are_ignored() {
    let base = two_tier();
    assert_eq!(base.with_tier_width(0, 0.0), base);
    assert_eq!(base.with_tier_width(0, f64::NAN), base);
    assert_eq!(base.with_tier_height(1, -2.0), base);
    assert_eq!(base.with_tier_width(7, 4.0), base);
}

#[test]
fn tier_flavor_and_height_set_by_index() {
    let config = two_tier().with_tier_flavor(1, "Chocolate").with_tier_height(1, 6.0);
    assert_eq!(config.layers[1].flavor, "Chocolate");
    assert_eq!(config.layers[1].height, 6.0);
    assert_eq!(config.layers[0].flavor, "Vanilla");
}

// =============================================================
// Toppings
// =============================================================

#[test]
fn toggle_flips_boolean_topping() {
    let base = CakeConfig::default_for(&sample_catalog());
    let on = base.with_topping_toggled("Sprinkles");
    assert_eq!(on.toppings["Sprinkles"], ToppingValue::Toggle(true));
    assert_eq!(on.with_topping_toggled("Sprinkles"), base);
}

#[test]
fn toggle_ignores_countable_topping() {
    let base = CakeConfig::default_for(&sample_catalog());
    assert_eq!(base.with_topping_toggled("Cherries"), base);
}

#[test]
fn adjust_clamps_to_ceiling_and_floor() {
    let base = CakeConfig::default_for(&sample_catalog());
    let high = base.with_topping_adjusted("Cherries", 20);
    assert_eq!(high.toppings["Cherries"], ToppingValue::Count(MAX_TOPPING_COUNT));
    let higher = high.with_topping_adjusted("Cherries", 1);
    assert_eq!(higher.toppings["Cherries"], ToppingValue::Count(MAX_TOPPING_COUNT));
    let low = base.with_topping_adjusted("Cherries", -3);
    assert_eq!(low.toppings["Cherries"], ToppingValue::Count(0));
}

#[test]
fn adjust_ignores_boolean_topping() {
    let base = CakeConfig::default_for(&sample_catalog());
    assert_eq!(base.with_topping_adjusted("Sprinkles", 2), base);
}

#[test]
fn topping_value_serde_is_untagged() {
    assert_eq!(serde_json::from_str::<ToppingValue>("true").unwrap(), ToppingValue::Toggle(true));
    assert_eq!(serde_json::from_str::<ToppingValue>("3").unwrap(), ToppingValue::Count(3));
    assert!(serde_json::from_str::<ToppingValue>("-1").is_err());
}

#[test]
fn reconcile_keeps_persisting_values_and_drops_removed() {
    let mut catalog = sample_catalog();
    let config = CakeConfig::default_for(&catalog)
        .with_topping_adjusted("Cherries", 4)
        .with_topping_toggled("Sprinkles");

    catalog.toppings.retain(|a| a.name != "Sprinkles");
    let reconciled = config.with_toppings_reconciled(&catalog);
    assert!(!reconciled.toppings.contains_key("Sprinkles"));
    assert_eq!(reconciled.toppings["Cherries"], ToppingValue::Count(4));
    assert!(reconciled.toppings_match(&catalog));
}

// =============================================================
// Message
// =============================================================

#[test]
fn message_text_truncates_to_forty_chars() {
    let long = "x".repeat(60);
    let config = CakeConfig::default_for(&sample_catalog()).with_message_text(&long);
    assert_eq!(config.message_config.text.chars().count(), MAX_MESSAGE_LEN);
}

#[test]
fn message_truncation_respects_multibyte_chars() {
    let long = "é".repeat(45);
    let config = CakeConfig::default_for(&sample_catalog()).with_message_text(&long);
    assert_eq!(config.message_config.text.chars().count(), MAX_MESSAGE_LEN);
}

#[test]
fn message_color_must_be_hex() {
    let base = CakeConfig::default_for(&sample_catalog());
    assert_eq!(base.with_message_color("pink"), base);
    assert_eq!(base.with_message_color("#ff00aa").message_config.color, "#ff00aa");
}

// =============================================================
// Validation
// =============================================================

#[test]
fn validate_rejects_contract_violations() {
    let base = CakeConfig::default_for(&sample_catalog());

    let mut empty = base.clone();
    empty.layers.clear();
    assert_eq!(empty.validate(), Err(ConfigError::TierCount(0)));

    let mut inverted = two_tier();
    inverted.layers[1].width = 9.0;
    assert_eq!(inverted.validate(), Err(ConfigError::TierWiderThanBelow(1)));

    let mut zero = base.clone();
    zero.layers[0].height = 0.0;
    assert_eq!(zero.validate(), Err(ConfigError::InvalidDimension(0)));

    let mut long = base.clone();
    long.message_config.text = "y".repeat(41);
    assert_eq!(long.validate(), Err(ConfigError::MessageTooLong(41)));

    let mut greedy = base.clone();
    greedy.toppings.insert("Cherries".into(), ToppingValue::Count(13));
    assert!(matches!(greedy.validate(), Err(ConfigError::ToppingCountExceeded { count: 13, .. })));
}

// =============================================================
// Edit
// =============================================================

#[test]
fn edit_serde_uses_op_tag() {
    let edit: Edit = serde_json::from_str(r#"{"op": "set_tier_width", "index": 0, "width": 8}"#).unwrap();
    assert_eq!(edit, Edit::SetTierWidth { index: 0, width: 8.0 });
    let json = serde_json::to_value(Edit::AddTier).unwrap();
    assert_eq!(json["op"], "add_tier");
}

#[test]
fn edit_apply_matches_helpers() {
    let base = two_tier();
    assert_eq!(Edit::SetTierWidth { index: 0, width: 4.0 }.apply(&base), base.with_tier_width(0, 4.0));
    assert_eq!(Edit::SetShape { shape: CakeShape::Heart }.apply(&base).shape, CakeShape::Heart);
    assert_eq!(
        Edit::AdjustTopping { name: "Cherries".into(), delta: 2 }.apply(&base),
        base.with_topping_adjusted("Cherries", 2)
    );
}

#[test]
fn config_serde_uses_camel_case() {
    let config = CakeConfig::default_for(&sample_catalog());
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["frostingCoverage"], "naked");
    assert_eq!(json["messageConfig"]["font"], "script");
    let back: CakeConfig = serde_json::from_value(json).unwrap();
    assert_eq!(back, config);
}
