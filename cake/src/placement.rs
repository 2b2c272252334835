//! Placement primitives: zones, decoration kinds, and the tier stack.
//!
//! These are the pure building blocks the [`crate::planner`] composes into a
//! full plan. Nothing here holds state or randomness.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use serde::{Deserialize, Serialize};

use crate::config::{CakeShape, Tier};
use crate::consts::{
    BORDER_INSET, BORDER_SPACING, FALLBACK_BOTTOM_WIDTH, FALLBACK_TOP_WIDTH, INNER_INSET, MIN_BORDER_COUNT,
    PLATE_THICKNESS, SCATTER_INSET, SCENE_HEIGHT_FACTOR, SCENE_WIDTH_DIVISOR, TEXT_BASE_SIZE, TEXT_MIN_SIZE,
    TEXT_SIZE_PER_CHAR,
};
use crate::footprint::{self, PlanePoint};

// =============================================================================
// ZONES
// =============================================================================

/// Concentric placement bands on the top surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Piped borders along the edge.
    Border,
    /// Evenly spaced ring of countable decorations.
    Inner,
    /// Dense random decor.
    Scatter,
}

impl Zone {
    /// Fraction of the footprint scale this zone occupies.
    #[must_use]
    pub fn inset(self) -> f64 {
        match self {
            Self::Border => BORDER_INSET,
            Self::Inner => INNER_INSET,
            Self::Scatter => SCATTER_INSET,
        }
    }
}

// =============================================================================
// DECORATION KINDS
// =============================================================================

/// Dense decor generated once per shape and top-tier size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScatterKind {
    Sprinkles,
    Nuts,
    Cookies,
    GoldFlakes,
    Confetti,
}

impl ScatterKind {
    /// Fixed number of pieces generated for this kind.
    #[must_use]
    pub fn population(self) -> usize {
        match self {
            Self::Sprinkles => 250,
            Self::Nuts => 60,
            Self::Cookies => 50,
            Self::GoldFlakes | Self::Confetti => 120,
        }
    }

    /// Colors pieces are drawn from.
    #[must_use]
    pub fn palette(self) -> &'static [&'static str] {
        match self {
            Self::Sprinkles => &["#FF6B9D", "#FFD93D", "#6BCB77", "#4D96FF", "#FFFFFF", "#C77DFF"],
            Self::Nuts => &["#A0522D", "#8B5A2B", "#C19A6B"],
            Self::Cookies => &["#3B2418", "#4A2F1F"],
            Self::GoldFlakes => &["#D4AF37", "#FFD700", "#E6BE8A"],
            Self::Confetti => &["#FF595E", "#FFCA3A", "#8AC926", "#1982C4", "#6A4C93"],
        }
    }

    /// Uniform size of one piece in scene units.
    #[must_use]
    pub fn piece_size(self) -> f64 {
        match self {
            Self::Sprinkles => 0.04,
            Self::Nuts => 0.06,
            Self::Cookies => 0.12,
            Self::GoldFlakes => 0.03,
            Self::Confetti => 0.035,
        }
    }
}

/// Renderer-facing kind of a topping, resolved from its catalog name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "scatter")]
pub enum ToppingKind {
    Cherry,
    Flower,
    Chocolate,
    Macaron,
    Candle,
    /// Piped border along the top edge.
    Piping,
    Scatter(ScatterKind),
    /// No renderer for this name; the topping is priced but not drawn.
    Unknown,
}

/// How a topping kind is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Ring,
    Border,
    Scatter(ScatterKind),
    Hidden,
}

impl ToppingKind {
    /// Resolve a catalog topping name by keyword, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        let has = |needle: &str| lower.contains(needle);

        if has("sprinkle") {
            Self::Scatter(ScatterKind::Sprinkles)
        } else if has("gold") {
            Self::Scatter(ScatterKind::GoldFlakes)
        } else if has("confetti") {
            Self::Scatter(ScatterKind::Confetti)
        } else if has("nut") || has("almond") || has("pistachio") {
            Self::Scatter(ScatterKind::Nuts)
        } else if has("cookie") || has("oreo") {
            Self::Scatter(ScatterKind::Cookies)
        } else if has("cherr") {
            Self::Cherry
        } else if has("flower") || has("rose") {
            Self::Flower
        } else if has("macaron") {
            Self::Macaron
        } else if has("chocolate") || has("truffle") {
            Self::Chocolate
        } else if has("candle") {
            Self::Candle
        } else if has("border") || has("piping") || has("pearl") {
            Self::Piping
        } else {
            Self::Unknown
        }
    }

    #[must_use]
    pub fn layout(self) -> Layout {
        match self {
            Self::Cherry | Self::Flower | Self::Chocolate | Self::Macaron | Self::Candle => Layout::Ring,
            Self::Piping => Layout::Border,
            Self::Scatter(kind) => Layout::Scatter(kind),
            Self::Unknown => Layout::Hidden,
        }
    }

    /// Color used when the catalog does not provide one.
    #[must_use]
    pub fn default_color(self) -> &'static str {
        match self {
            Self::Cherry => "#B3001B",
            Self::Flower => "#F7A1C4",
            Self::Chocolate => "#4B2E1E",
            Self::Macaron => "#F5C6D6",
            Self::Candle => "#FFF4D6",
            Self::Piping => "#FFFDF7",
            Self::Scatter(kind) => kind.palette()[0],
            Self::Unknown => crate::consts::FALLBACK_COLOR,
        }
    }

    /// Per-axis size of one piece in scene units.
    #[must_use]
    pub fn piece_scale(self) -> [f64; 3] {
        match self {
            Self::Cherry => [0.08; 3],
            Self::Flower | Self::Macaron => [0.1, 0.06, 0.1],
            Self::Chocolate => [0.09; 3],
            Self::Candle => [0.03, 0.25, 0.03],
            Self::Piping => [0.07, 0.05, 0.07],
            Self::Scatter(kind) => [kind.piece_size(); 3],
            Self::Unknown => [0.0; 3],
        }
    }
}

// =============================================================================
// STRUCTURED PLACEMENT
// =============================================================================

/// Position of item `index` of `total` spaced evenly around the outline of a
/// top tier at `top_scale`, pulled in to `zone`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn place(index: usize, total: usize, shape: CakeShape, top_scale: f64, zone: Zone) -> PlanePoint {
    let t = if total == 0 { 0.0 } else { index as f64 / total as f64 };
    footprint::boundary_point(shape, top_scale * zone.inset(), t)
}

/// Number of border pieces for a top tier at `top_scale`: one per
/// `BORDER_SPACING` of perimeter, never fewer than `MIN_BORDER_COUNT`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn border_count(shape: CakeShape, top_scale: f64) -> usize {
    let by_spacing = (footprint::perimeter(shape, top_scale) / BORDER_SPACING).ceil();
    if by_spacing.is_finite() && by_spacing > 0.0 {
        (by_spacing as usize).max(MIN_BORDER_COUNT)
    } else {
        MIN_BORDER_COUNT
    }
}

/// Message glyph size: shrinks as the text grows, floored at `TEXT_MIN_SIZE`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn text_size(char_count: usize) -> f64 {
    (TEXT_BASE_SIZE - char_count as f64 * TEXT_SIZE_PER_CHAR).max(TEXT_MIN_SIZE)
}

// =============================================================================
// TIER STACK
// =============================================================================

/// One tier converted to scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierSlot {
    /// Footprint scale (`width / 5`).
    pub scale: f64,
    /// Scene height (`height * 0.15`).
    pub height: f64,
    /// Elevation of the tier's underside.
    pub base_y: f64,
}

impl TierSlot {
    #[must_use]
    pub fn top_y(&self) -> f64 {
        self.base_y + self.height
    }
}

/// Tiers stacked bottom-up on the plate.
#[derive(Debug, Clone, PartialEq)]
pub struct TierStack {
    pub slots: Vec<TierSlot>,
}

impl TierStack {
    #[must_use]
    pub fn from_layers(layers: &[Tier]) -> Self {
        let mut base_y = PLATE_THICKNESS;
        let slots = layers
            .iter()
            .map(|tier| {
                let slot = TierSlot { scale: width_scale(tier.width), height: tier.height * SCENE_HEIGHT_FACTOR, base_y };
                base_y += slot.height;
                slot
            })
            .collect();
        Self { slots }
    }

    /// Scale of the top tier; a 6-inch tier when the stack is empty.
    #[must_use]
    pub fn top_scale(&self) -> f64 {
        self.slots
            .last()
            .map_or_else(|| width_scale(FALLBACK_TOP_WIDTH), |s| s.scale)
    }

    /// Scale of the bottom tier; a 12-inch tier when the stack is empty.
    #[must_use]
    pub fn bottom_scale(&self) -> f64 {
        self.slots
            .first()
            .map_or_else(|| width_scale(FALLBACK_BOTTOM_WIDTH), |s| s.scale)
    }

    /// Elevation of the top surface; the plate surface when the stack is empty.
    #[must_use]
    pub fn top_surface(&self) -> f64 {
        self.slots.last().map_or(PLATE_THICKNESS, TierSlot::top_y)
    }
}

/// Convert a width in inches to a footprint scale.
#[must_use]
pub fn width_scale(width: f64) -> f64 {
    width / SCENE_WIDTH_DIVISOR
}
