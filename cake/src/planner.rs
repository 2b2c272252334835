//! Geometry/placement planner.
//!
//! DESIGN
//! ======
//! `PlacementPlanner::plan` turns a configuration plus catalog colors into a
//! renderer-agnostic list of placed elements: the plate, one entry per tier,
//! every decoration piece, and the message. The planner keeps two caches:
//!
//! - Scatter sets. Each scatter kind (sprinkles, nuts, ...) is generated once
//!   with a fixed population and reused until the shape or the top-tier scale
//!   changes, so unrelated edits never reshuffle decor.
//! - The last plan, keyed on the configuration and the catalog-derived colors
//!   it used. Re-planning identical inputs returns the cached plan.
//!
//! Randomness comes from a seeded `StdRng`, so a planner built with the same
//! seed produces the same plans.

#[cfg(test)]
#[path = "planner_test.rs"]
mod planner_test;

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::f64::consts::{FRAC_PI_2, TAU};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::{CakeConfig, CakeShape, FrostingCoverage, MessageFont, ToppingValue};
use crate::consts::{
    DEFAULT_RING_COUNT, FALLBACK_COLOR, PLATE_COLOR, PLATE_OVERHANG, PLATE_THICKNESS, SURFACE_LIFT,
    TEXT_MAX_WIDTH_RATIO,
};
use crate::footprint::{self, PlanePoint};
use crate::placement::{self, Layout, ScatterKind, TierStack, ToppingKind, Zone};

// =============================================================================
// PLAN TYPES
// =============================================================================

/// A point or vector in scene space (`y` up).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }

    #[must_use]
    pub fn on_surface(point: PlanePoint, y: f64) -> Self {
        Self { x: point.x, y, z: point.z }
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

/// What a placed element is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    Plate { shape: CakeShape },
    Tier { index: usize, shape: CakeShape },
    /// One piece of a ring or border topping.
    Topping { name: String, topping: ToppingKind },
    /// One piece of a scatter topping.
    Scatter { name: String, scatter: ScatterKind },
    Message { text: String, font: MessageFont, size: f64, max_width: f64 },
}

/// One element of the plan with its transform and material hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedElement {
    pub kind: ElementKind,
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementPlan {
    pub elements: Vec<PlacedElement>,
}

impl PlacementPlan {
    /// Elements matching a predicate.
    pub fn filter<'a, F>(&'a self, pred: F) -> impl Iterator<Item = &'a PlacedElement>
    where
        F: Fn(&ElementKind) -> bool + 'a,
    {
        self.elements.iter().filter(move |e| pred(&e.kind))
    }

    /// Number of pieces placed for the named topping.
    #[must_use]
    pub fn topping_pieces(&self, topping: &str) -> usize {
        self.filter(|k| match k {
            ElementKind::Topping { name, .. } | ElementKind::Scatter { name, .. } => name == topping,
            _ => false,
        })
        .count()
    }
}

// =============================================================================
// SCATTER CACHE
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct ScatterPiece {
    point: PlanePoint,
    rotation: Vec3,
    color: &'static str,
}

#[derive(Debug, Clone)]
struct ScatterSet {
    shape: CakeShape,
    /// Bit pattern of the top-tier scale the set was generated for.
    scale_bits: u64,
    pieces: Vec<ScatterPiece>,
}

impl ScatterSet {
    fn generate(kind: ScatterKind, shape: CakeShape, top_scale: f64, rng: &mut StdRng) -> Self {
        let palette = kind.palette();
        let radius = top_scale * Zone::Scatter.inset();
        let pieces = (0..kind.population())
            .map(|_| ScatterPiece {
                point: footprint::scatter_point(shape, radius, rng),
                rotation: Vec3::new(rng.random::<f64>() * TAU, rng.random::<f64>() * TAU, rng.random::<f64>() * TAU),
                color: palette[rng.random_range(0..palette.len())],
            })
            .collect();
        Self { shape, scale_bits: top_scale.to_bits(), pieces }
    }

    fn matches(&self, shape: CakeShape, top_scale: f64) -> bool {
        self.shape == shape && self.scale_bits == top_scale.to_bits()
    }
}

// =============================================================================
// PLAN MEMO
// =============================================================================

/// Catalog-derived material hints a plan depends on.
#[derive(Debug, Clone, PartialEq)]
struct Palette {
    frosting: String,
    tier_flavors: Vec<String>,
    texture_url: Option<String>,
    toppings: BTreeMap<String, String>,
}

impl Palette {
    fn resolve(config: &CakeConfig, catalog: &Catalog) -> Self {
        Self {
            frosting: catalog
                .frosting_color(&config.frosting)
                .unwrap_or(FALLBACK_COLOR)
                .to_owned(),
            tier_flavors: config
                .layers
                .iter()
                .map(|t| catalog.flavor_color(&t.flavor).unwrap_or(FALLBACK_COLOR).to_owned())
                .collect(),
            texture_url: catalog.texture_url(&config.texture).map(str::to_owned),
            toppings: config
                .toppings
                .keys()
                .filter_map(|name| catalog.topping_color(name).map(|c| (name.clone(), c.to_owned())))
                .collect(),
        }
    }

    fn topping_color(&self, name: &str, kind: ToppingKind) -> String {
        self.toppings
            .get(name)
            .cloned()
            .unwrap_or_else(|| kind.default_color().to_owned())
    }
}

// =============================================================================
// PLANNER
// =============================================================================

pub struct PlacementPlanner {
    rng: StdRng,
    scatter: HashMap<ScatterKind, ScatterSet>,
    memo: Option<(CakeConfig, Palette, PlacementPlan)>,
}

impl PlacementPlanner {
    /// A planner whose scatter sets are drawn from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), scatter: HashMap::new(), memo: None }
    }

    /// Compute the placement plan for `config`.
    pub fn plan(&mut self, config: &CakeConfig, catalog: &Catalog) -> PlacementPlan {
        let palette = Palette::resolve(config, catalog);
        if let Some((memo_config, memo_palette, plan)) = &self.memo {
            if memo_config == config && *memo_palette == palette {
                return plan.clone();
            }
        }

        let plan = self.build(config, &palette);
        self.memo = Some((config.clone(), palette, plan.clone()));
        plan
    }

    fn build(&mut self, config: &CakeConfig, palette: &Palette) -> PlacementPlan {
        let shape = config.shape;
        let stack = TierStack::from_layers(&config.layers);
        let top_scale = stack.top_scale();
        let surface = stack.top_surface() + SURFACE_LIFT;
        let mut elements = Vec::new();

        let plate_scale = stack.bottom_scale() * PLATE_OVERHANG;
        elements.push(PlacedElement {
            kind: ElementKind::Plate { shape },
            position: Vec3::new(0.0, PLATE_THICKNESS / 2.0, 0.0),
            rotation: Vec3::default(),
            scale: Vec3::new(plate_scale, PLATE_THICKNESS, plate_scale),
            color: PLATE_COLOR.to_owned(),
            texture_url: None,
        });

        for (index, slot) in stack.slots.iter().enumerate() {
            let color = match config.frosting_coverage {
                FrostingCoverage::Full => palette.frosting.clone(),
                FrostingCoverage::Naked => palette
                    .tier_flavors
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| FALLBACK_COLOR.to_owned()),
            };
            elements.push(PlacedElement {
                kind: ElementKind::Tier { index, shape },
                position: Vec3::new(0.0, slot.base_y + slot.height / 2.0, 0.0),
                rotation: Vec3::default(),
                scale: Vec3::new(slot.scale, slot.height, slot.scale),
                color,
                texture_url: palette.texture_url.clone(),
            });
        }

        for (name, value) in &config.toppings {
            if !value.is_active() {
                continue;
            }
            let kind = ToppingKind::from_name(name);
            match kind.layout() {
                Layout::Ring => {
                    let total = ring_count(*value);
                    let color = palette.topping_color(name, kind);
                    elements.extend((0..total).map(|i| {
                        let point = placement::place(i, total, shape, top_scale, Zone::Inner);
                        topping_piece(name, kind, point, surface, &color)
                    }));
                }
                Layout::Border => {
                    let total = placement::border_count(shape, top_scale);
                    let color = palette.topping_color(name, kind);
                    elements.extend((0..total).map(|i| {
                        let point = placement::place(i, total, shape, top_scale, Zone::Border);
                        topping_piece(name, kind, point, surface, &color)
                    }));
                }
                Layout::Scatter(scatter) => {
                    let set = self.scatter_set(scatter, shape, top_scale);
                    let size = Vec3::splat(scatter.piece_size());
                    elements.extend(set.pieces.iter().map(|piece| PlacedElement {
                        kind: ElementKind::Scatter { name: name.clone(), scatter },
                        position: Vec3::on_surface(piece.point, surface),
                        rotation: piece.rotation,
                        scale: size,
                        color: piece.color.to_owned(),
                        texture_url: None,
                    }));
                }
                Layout::Hidden => debug!(topping = %name, "no renderer for topping; omitted from plan"),
            }
        }

        let message = &config.message_config;
        if !message.text.is_empty() {
            let (span_x, _) = footprint::span(shape, top_scale);
            let [dx, dz] = message.position;
            elements.push(PlacedElement {
                kind: ElementKind::Message {
                    text: message.text.clone(),
                    font: message.font,
                    size: placement::text_size(message.text.chars().count()),
                    max_width: span_x * TEXT_MAX_WIDTH_RATIO,
                },
                position: Vec3::new(dx, surface, dz),
                rotation: Vec3::new(-FRAC_PI_2, 0.0, 0.0),
                scale: Vec3::splat(1.0),
                color: message.color.clone(),
                texture_url: None,
            });
        }

        PlacementPlan { elements }
    }

    fn scatter_set(&mut self, kind: ScatterKind, shape: CakeShape, top_scale: f64) -> &ScatterSet {
        let rng = &mut self.rng;
        let mut generate = || {
            debug!(?kind, ?shape, top_scale, "generating scatter set");
            ScatterSet::generate(kind, shape, top_scale, rng)
        };
        match self.scatter.entry(kind) {
            Entry::Occupied(mut slot) => {
                if !slot.get().matches(shape, top_scale) {
                    slot.insert(generate());
                }
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(generate()),
        }
    }
}

fn ring_count(value: ToppingValue) -> usize {
    match value {
        ToppingValue::Count(n) => n as usize,
        ToppingValue::Toggle(true) => DEFAULT_RING_COUNT as usize,
        ToppingValue::Toggle(false) => 0,
    }
}

fn topping_piece(name: &str, kind: ToppingKind, point: PlanePoint, y: f64, color: &str) -> PlacedElement {
    PlacedElement {
        kind: ElementKind::Topping { name: name.to_owned(), topping: kind },
        position: Vec3::on_surface(point, y),
        rotation: Vec3::new(0.0, point.heading(), 0.0),
        scale: Vec3::from(kind.piece_scale()),
        color: color.to_owned(),
        texture_url: None,
    }
}
