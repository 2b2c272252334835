//! Shared numeric constants for the cake crate.

// ── Pricing ─────────────────────────────────────────────────────

/// Flat fee applied to every cake.
pub const BASE_FEE: f64 = 300.0;

/// Cost per cubic inch-ish unit of tier volume (`width * height`).
pub const LAYER_VOLUME_COST_FACTOR: f64 = 15.0;

/// Flat fee when the message text is non-empty.
pub const MESSAGE_FEE: f64 = 50.0;

// ── Configuration limits ────────────────────────────────────────

/// Fewest tiers a cake may have.
pub const MIN_TIERS: usize = 1;

/// Most tiers a cake may have.
pub const MAX_TIERS: usize = 5;

/// Per-topping ceiling for countable decorations.
pub const MAX_TOPPING_COUNT: u32 = 12;

/// Maximum message length in characters.
pub const MAX_MESSAGE_LEN: usize = 40;

/// Number of snapshots kept by the undo/redo history.
pub const HISTORY_LIMIT: usize = 10;

// ── Defaults ────────────────────────────────────────────────────

pub const DEFAULT_TIER_WIDTH: f64 = 6.0;
pub const DEFAULT_TIER_HEIGHT: f64 = 4.0;
pub const DEFAULT_FLAVOR: &str = "Vanilla";
pub const DEFAULT_FROSTING: &str = "Buttercream";
pub const DEFAULT_TEXTURE: &str = "Smooth";
pub const DEFAULT_MESSAGE_COLOR: &str = "#4A2C2A";

/// Neutral color used when the catalog has no color for an asset.
pub const FALLBACK_COLOR: &str = "#F5E6D3";

// ── Scene scale model ───────────────────────────────────────────

/// Inches of tier width per scene unit of footprint scale.
pub const SCENE_WIDTH_DIVISOR: f64 = 5.0;

/// Scene units per inch of tier height.
pub const SCENE_HEIGHT_FACTOR: f64 = 0.15;

/// Thickness of the serving plate beneath the bottom tier.
pub const PLATE_THICKNESS: f64 = 0.1;

/// Plate footprint relative to the bottom tier.
pub const PLATE_OVERHANG: f64 = 1.25;

pub const PLATE_COLOR: &str = "#F8F8F8";

/// Assumed top-tier width (inches) when there are no tiers.
pub const FALLBACK_TOP_WIDTH: f64 = 6.0;

/// Assumed bottom-tier width (inches) when there are no tiers.
pub const FALLBACK_BOTTOM_WIDTH: f64 = 12.0;

// ── Footprints ──────────────────────────────────────────────────

pub const SQUARE_SIDE_FACTOR: f64 = 1.8;
pub const RECT_WIDTH_FACTOR: f64 = 2.2;
pub const RECT_DEPTH_FACTOR: f64 = 1.5;

/// Converts heart-curve units (roughly ±17) into scene units.
pub const HEART_CURVE_SCALE: f64 = 0.035;

/// Extra multiplier that makes the heart read at the same size as a round tier.
pub const HEART_SHAPE_FACTOR: f64 = 2.8;

/// Segments used to measure the heart perimeter.
pub const HEART_PERIMETER_SAMPLES: usize = 256;

// ── Placement ───────────────────────────────────────────────────

pub const BORDER_INSET: f64 = 0.95;
pub const INNER_INSET: f64 = 0.75;
pub const SCATTER_INSET: f64 = 0.7;

/// Minimum spacing between piped border pieces in scene units.
pub const BORDER_SPACING: f64 = 0.20;

/// Border pieces never drop below this count.
pub const MIN_BORDER_COUNT: usize = 8;

/// Ring size used when a ring topping is a plain on/off toggle.
pub const DEFAULT_RING_COUNT: u32 = 8;

/// Lift above the top surface so decor does not z-fight the frosting.
pub const SURFACE_LIFT: f64 = 0.02;

// ── Message text ────────────────────────────────────────────────

pub const TEXT_BASE_SIZE: f64 = 0.3;
pub const TEXT_SIZE_PER_CHAR: f64 = 0.005;
pub const TEXT_MIN_SIZE: f64 = 0.2;

/// Fraction of the top-tier span the message may occupy.
pub const TEXT_MAX_WIDTH_RATIO: f64 = 0.8;
