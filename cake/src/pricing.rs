//! Deterministic price estimate for a configuration.
//!
//! PRICING
//! =======
//! ```text
//! price = BASE_FEE
//!       + Σ tiers    (width * height * 15 * shape multiplier + flavor surcharge + height surcharge)
//!       + Σ toppings (cost if toggled on, cost * n if counted)
//!       + 50 if the message is non-empty
//!       + texture cost
//! ```
//! rounded up to a whole currency unit.
//!
//! Lookups are built once per catalog. Unknown names resolve to a neutral
//! value (multiplier 1.0, surcharge 0), and a catalog without shapes or
//! flavors prices every cake at the base fee.

#[cfg(test)]
#[path = "pricing_test.rs"]
mod pricing_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::{CakeConfig, ToppingValue};
use crate::consts::{BASE_FEE, LAYER_VOLUME_COST_FACTOR, MESSAGE_FEE};

/// Itemized estimate. `total` is the rounded-up sum of the other fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base: f64,
    pub tiers: f64,
    pub toppings: f64,
    pub message: f64,
    pub texture: f64,
    pub total: u32,
}

/// Price lookups derived from a catalog.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    loaded: bool,
    /// Lowercased shape name -> volume multiplier.
    shape_multipliers: HashMap<String, f64>,
    /// Lowercased flavor name -> per-tier surcharge.
    flavor_surcharges: HashMap<String, f64>,
    /// Layer height in inches -> per-tier surcharge.
    height_surcharges: Vec<(f64, f64)>,
    topping_costs: HashMap<String, f64>,
    texture_costs: HashMap<String, f64>,
}

impl PriceTable {
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            loaded: catalog.is_loaded(),
            shape_multipliers: catalog
                .shapes
                .iter()
                .map(|a| (a.name.to_lowercase(), a.metadata.multiplier.unwrap_or(1.0)))
                .collect(),
            flavor_surcharges: catalog
                .flavors
                .iter()
                .map(|a| (a.name.to_lowercase(), a.price_modifier))
                .collect(),
            height_surcharges: catalog
                .heights
                .iter()
                .filter_map(|a| a.metadata.value.map(|v| (v, a.price_modifier)))
                .collect(),
            topping_costs: catalog
                .toppings
                .iter()
                .map(|a| (a.name.clone(), a.price_modifier))
                .collect(),
            texture_costs: catalog
                .textures
                .iter()
                .map(|a| (a.name.clone(), a.price_modifier))
                .collect(),
        }
    }

    /// Whether the table was built from a catalog with shapes and flavors.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn shape_multiplier(&self, shape: &str) -> f64 {
        self.shape_multipliers
            .get(&shape.to_lowercase())
            .copied()
            .unwrap_or(1.0)
    }

    #[must_use]
    pub fn flavor_surcharge(&self, flavor: &str) -> f64 {
        self.flavor_surcharges
            .get(&flavor.to_lowercase())
            .copied()
            .unwrap_or(0.0)
    }

    #[must_use]
    pub fn height_surcharge(&self, height: f64) -> f64 {
        self.height_surcharges
            .iter()
            .find(|(value, _)| (value - height).abs() < f64::EPSILON)
            .map_or(0.0, |(_, cost)| *cost)
    }

    #[must_use]
    pub fn topping_cost(&self, name: &str) -> f64 {
        self.topping_costs.get(name).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn texture_cost(&self, name: &str) -> f64 {
        self.texture_costs.get(name).copied().unwrap_or(0.0)
    }

    /// Integer price estimate for `config`.
    #[must_use]
    pub fn quote(&self, config: &CakeConfig) -> u32 {
        self.breakdown(config).total
    }

    /// Itemized estimate for `config`.
    #[must_use]
    pub fn breakdown(&self, config: &CakeConfig) -> PriceBreakdown {
        if !self.loaded {
            return PriceBreakdown { base: BASE_FEE, total: round_up(BASE_FEE), ..PriceBreakdown::default() };
        }

        let multiplier = self.shape_multiplier(config.shape.as_str());
        let tiers = config
            .layers
            .iter()
            .map(|tier| {
                tier.width * tier.height * LAYER_VOLUME_COST_FACTOR * multiplier
                    + self.flavor_surcharge(&tier.flavor)
                    + self.height_surcharge(tier.height)
            })
            .sum::<f64>();

        let toppings = config
            .toppings
            .iter()
            .map(|(name, value)| match *value {
                ToppingValue::Toggle(true) => self.topping_cost(name),
                ToppingValue::Count(n) if n > 0 => self.topping_cost(name) * f64::from(n),
                _ => 0.0,
            })
            .sum::<f64>();

        let message = if config.message_config.text.is_empty() { 0.0 } else { MESSAGE_FEE };
        let texture = self.texture_cost(&config.texture);

        let total = round_up(BASE_FEE + tiers + toppings + message + texture);
        PriceBreakdown { base: BASE_FEE, tiers, toppings, message, texture, total }
    }
}

/// Round up to a whole unit, clamping negatives and non-finite sums to zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_up(price: f64) -> u32 {
    if !price.is_finite() || price <= 0.0 {
        return 0;
    }
    price.ceil().min(f64::from(u32::MAX)) as u32
}
