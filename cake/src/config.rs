//! Cake configuration: the central editable value.
//!
//! A [`CakeConfig`] is treated as an immutable value. Every edit produces a new
//! configuration through one of the `with_*` helpers (or an [`Edit`] applied
//! to the current value), and the editor commits that value to history.
//! Requests that fall outside the allowed ranges (a sixth tier, removing the
//! last tier, a thirteenth cherry) return an unchanged copy rather than an
//! error, so callers can issue them without guard conditions.
//!
//! The one invariant the helpers actively maintain is tier monotonicity:
//! every tier is at most as wide as the tier beneath it. Widening or narrowing
//! a tier cascades the constraint up the stack.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::consts::{
    DEFAULT_FLAVOR, DEFAULT_FROSTING, DEFAULT_MESSAGE_COLOR, DEFAULT_TEXTURE, DEFAULT_TIER_HEIGHT, DEFAULT_TIER_WIDTH,
    MAX_MESSAGE_LEN, MAX_TIERS, MAX_TOPPING_COUNT, MIN_TIERS,
};

// =============================================================================
// TYPES
// =============================================================================

/// Footprint of every tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CakeShape {
    #[default]
    Round,
    Square,
    Rectangle,
    Heart,
}

impl CakeShape {
    /// Resolve a catalog shape name. Unrecognized names fall back to `Round`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "square" => Self::Square,
            "rectangle" | "rectangular" | "sheet" => Self::Rectangle,
            "heart" => Self::Heart,
            _ => Self::Round,
        }
    }

    /// Canonical display name, matching the catalog's shape names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Round => "Round",
            Self::Square => "Square",
            Self::Rectangle => "Rectangle",
            Self::Heart => "Heart",
        }
    }
}

/// How much of the cake the frosting covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrostingCoverage {
    Full,
    #[default]
    Naked,
}

/// One tier of the cake, dimensions in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub width: f64,
    pub height: f64,
    pub flavor: String,
}

impl Default for Tier {
    fn default() -> Self {
        Self { width: DEFAULT_TIER_WIDTH, height: DEFAULT_TIER_HEIGHT, flavor: DEFAULT_FLAVOR.to_owned() }
    }
}

/// Value of a topping: a toggle for plain decorations, a count for countable ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToppingValue {
    Toggle(bool),
    Count(u32),
}

impl ToppingValue {
    /// The unset value for a topping of the given countability.
    #[must_use]
    pub fn unset(countable: bool) -> Self {
        if countable { Self::Count(0) } else { Self::Toggle(false) }
    }

    /// Whether this value contributes anything to price or placement.
    #[must_use]
    pub fn is_active(self) -> bool {
        match self {
            Self::Toggle(on) => on,
            Self::Count(n) => n > 0,
        }
    }
}

/// Font family keys offered for the message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFont {
    Classic,
    #[default]
    Script,
    Modern,
    Playful,
}

/// Piped message written on the top tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageConfig {
    pub text: String,
    /// Hex color string, e.g. `"#4A2C2A"`.
    pub color: String,
    pub font: MessageFont,
    /// Offset `[x, z]` from the top-centre, in scene units.
    #[serde(default)]
    pub position: [f64; 2],
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: DEFAULT_MESSAGE_COLOR.to_owned(),
            font: MessageFont::default(),
            position: [0.0, 0.0],
        }
    }
}

/// The full editable cake design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CakeConfig {
    pub shape: CakeShape,
    /// Tiers bottom-up.
    pub layers: Vec<Tier>,
    pub frosting: String,
    pub frosting_coverage: FrostingCoverage,
    pub texture: String,
    pub toppings: BTreeMap<String, ToppingValue>,
    pub message_config: MessageConfig,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("tier count {0} outside [1, 5]")]
    TierCount(usize),
    #[error("tier {0} has a non-positive or non-finite dimension")]
    InvalidDimension(usize),
    #[error("tier {0} is wider than the tier beneath it")]
    TierWiderThanBelow(usize),
    #[error("message is {0} characters, max 40")]
    MessageTooLong(usize),
    #[error("message color {0:?} is not a hex color")]
    InvalidColor(String),
    #[error("topping {name:?} count {count} exceeds 12")]
    ToppingCountExceeded { name: String, count: u32 },
}

// =============================================================================
// CONSTRUCTION + VALIDATION
// =============================================================================

impl CakeConfig {
    /// The starting design for a fresh session: one 6x4 vanilla tier, round,
    /// naked, and every catalog topping present but unset.
    #[must_use]
    pub fn default_for(catalog: &Catalog) -> Self {
        let frosting = catalog
            .frostings
            .first()
            .map_or_else(|| DEFAULT_FROSTING.to_owned(), |a| a.name.clone());
        let toppings = catalog
            .toppings
            .iter()
            .map(|a| (a.name.clone(), ToppingValue::unset(a.is_countable())))
            .collect();

        Self {
            shape: CakeShape::Round,
            layers: vec![Tier::default()],
            frosting,
            frosting_coverage: FrostingCoverage::Naked,
            texture: DEFAULT_TEXTURE.to_owned(),
            toppings,
            message_config: MessageConfig::default(),
        }
    }

    /// Check the structural contract. Only configurations built outside the
    /// `with_*` helpers (e.g. received over the wire) can fail this.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.layers.len();
        if !(MIN_TIERS..=MAX_TIERS).contains(&count) {
            return Err(ConfigError::TierCount(count));
        }
        for (i, tier) in self.layers.iter().enumerate() {
            if !is_valid_dimension(tier.width) || !is_valid_dimension(tier.height) {
                return Err(ConfigError::InvalidDimension(i));
            }
            if i > 0 && tier.width > self.layers[i - 1].width {
                return Err(ConfigError::TierWiderThanBelow(i));
            }
        }

        let len = self.message_config.text.chars().count();
        if len > MAX_MESSAGE_LEN {
            return Err(ConfigError::MessageTooLong(len));
        }
        if !is_hex_color(&self.message_config.color) {
            return Err(ConfigError::InvalidColor(self.message_config.color.clone()));
        }

        for (name, value) in &self.toppings {
            if let ToppingValue::Count(count) = *value {
                if count > MAX_TOPPING_COUNT {
                    return Err(ConfigError::ToppingCountExceeded { name: name.clone(), count });
                }
            }
        }
        Ok(())
    }

    /// Topmost tier, if any.
    #[must_use]
    pub fn top_tier(&self) -> Option<&Tier> {
        self.layers.last()
    }

    /// Whether the configured toppings cover exactly the catalog's topping names.
    #[must_use]
    pub fn toppings_match(&self, catalog: &Catalog) -> bool {
        self.toppings.len() == catalog.toppings.len()
            && catalog.topping_names().all(|name| self.toppings.contains_key(name))
    }

    /// Rebuild the topping map against the catalog: names that persist keep
    /// their value, new names start unset, names gone from the catalog drop.
    #[must_use]
    pub fn with_toppings_reconciled(&self, catalog: &Catalog) -> Self {
        let toppings = catalog
            .toppings
            .iter()
            .map(|asset| {
                let value = self
                    .toppings
                    .get(&asset.name)
                    .copied()
                    .unwrap_or_else(|| ToppingValue::unset(asset.is_countable()));
                (asset.name.clone(), value)
            })
            .collect();
        Self { toppings, ..self.clone() }
    }
}

fn is_valid_dimension(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Clamp every tier to the width of the tier beneath it, bottom-up.
pub fn enforce_tier_monotonicity(layers: &mut [Tier]) {
    for i in 1..layers.len() {
        let below = layers[i - 1].width;
        if layers[i].width > below {
            layers[i].width = below;
        }
    }
}

// =============================================================================
// COPY-WITH-CHANGE HELPERS
// =============================================================================

impl CakeConfig {
    /// Add a tier on top, copying the current top tier. No-op at the tier cap.
    #[must_use]
    pub fn with_tier_added(&self) -> Self {
        let mut next = self.clone();
        if next.layers.len() >= MAX_TIERS {
            return next;
        }
        let tier = next.top_tier().cloned().unwrap_or_default();
        next.layers.push(tier);
        enforce_tier_monotonicity(&mut next.layers);
        next
    }

    /// Remove the top tier. No-op when only one tier remains.
    #[must_use]
    pub fn with_tier_removed(&self) -> Self {
        let mut next = self.clone();
        if next.layers.len() > MIN_TIERS {
            next.layers.pop();
        }
        next
    }

    /// Set a tier's width and cascade the narrowing up the stack.
    ///
    /// A width wider than the tier beneath is clamped to it.
    #[must_use]
    pub fn with_tier_width(&self, index: usize, width: f64) -> Self {
        let mut next = self.clone();
        if !is_valid_dimension(width) {
            return next;
        }
        let Some(tier) = next.layers.get_mut(index) else {
            return next;
        };
        tier.width = width;
        enforce_tier_monotonicity(&mut next.layers);
        next
    }

    #[must_use]
    pub fn with_tier_height(&self, index: usize, height: f64) -> Self {
        let mut next = self.clone();
        if !is_valid_dimension(height) {
            return next;
        }
        if let Some(tier) = next.layers.get_mut(index) {
            tier.height = height;
        }
        next
    }

    #[must_use]
    pub fn with_tier_flavor(&self, index: usize, flavor: &str) -> Self {
        let mut next = self.clone();
        if let Some(tier) = next.layers.get_mut(index) {
            flavor.clone_into(&mut tier.flavor);
        }
        next
    }

    #[must_use]
    pub fn with_shape(&self, shape: CakeShape) -> Self {
        Self { shape, ..self.clone() }
    }

    #[must_use]
    pub fn with_frosting(&self, frosting: &str) -> Self {
        Self { frosting: frosting.to_owned(), ..self.clone() }
    }

    #[must_use]
    pub fn with_coverage(&self, frosting_coverage: FrostingCoverage) -> Self {
        Self { frosting_coverage, ..self.clone() }
    }

    #[must_use]
    pub fn with_texture(&self, texture: &str) -> Self {
        Self { texture: texture.to_owned(), ..self.clone() }
    }

    /// Flip a boolean topping. Missing names are switched on; countable
    /// toppings are left alone.
    #[must_use]
    pub fn with_topping_toggled(&self, name: &str) -> Self {
        let mut next = self.clone();
        let value = match next.toppings.get(name) {
            Some(ToppingValue::Toggle(on)) => ToppingValue::Toggle(!on),
            Some(ToppingValue::Count(_)) => return next,
            None => ToppingValue::Toggle(true),
        };
        next.toppings.insert(name.to_owned(), value);
        next
    }

    /// Adjust a countable topping by `delta`, clamped to `[0, MAX_TOPPING_COUNT]`.
    /// Boolean toppings are left alone.
    #[must_use]
    pub fn with_topping_adjusted(&self, name: &str, delta: i32) -> Self {
        let mut next = self.clone();
        let current = match next.toppings.get(name) {
            Some(ToppingValue::Count(n)) => i64::from(*n),
            Some(ToppingValue::Toggle(_)) => return next,
            None => 0,
        };
        let clamped = (current + i64::from(delta)).clamp(0, i64::from(MAX_TOPPING_COUNT));
        let count = u32::try_from(clamped).unwrap_or(0);
        next.toppings.insert(name.to_owned(), ToppingValue::Count(count));
        next
    }

    /// Set the message text, truncated to `MAX_MESSAGE_LEN` characters.
    #[must_use]
    pub fn with_message_text(&self, text: &str) -> Self {
        let mut next = self.clone();
        next.message_config.text = text.chars().take(MAX_MESSAGE_LEN).collect();
        next
    }

    /// Set the message color. Strings that are not hex colors are ignored.
    #[must_use]
    pub fn with_message_color(&self, color: &str) -> Self {
        let mut next = self.clone();
        if is_hex_color(color) {
            color.clone_into(&mut next.message_config.color);
        }
        next
    }

    #[must_use]
    pub fn with_message_font(&self, font: MessageFont) -> Self {
        let mut next = self.clone();
        next.message_config.font = font;
        next
    }

    #[must_use]
    pub fn with_message_position(&self, position: [f64; 2]) -> Self {
        let mut next = self.clone();
        if position.iter().all(|v| v.is_finite()) {
            next.message_config.position = position;
        }
        next
    }
}

// =============================================================================
// EDITS AS DATA
// =============================================================================

/// A single user edit, expressed as data so it can cross process boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    AddTier,
    RemoveTier,
    SetTierWidth { index: usize, width: f64 },
    SetTierHeight { index: usize, height: f64 },
    SetTierFlavor { index: usize, flavor: String },
    SetShape { shape: CakeShape },
    SetFrosting { frosting: String },
    SetCoverage { coverage: FrostingCoverage },
    SetTexture { texture: String },
    ToggleTopping { name: String },
    AdjustTopping { name: String, delta: i32 },
    SetMessageText { text: String },
    SetMessageColor { color: String },
    SetMessageFont { font: MessageFont },
    SetMessagePosition { position: [f64; 2] },
}

impl Edit {
    /// Produce the configuration that results from applying this edit.
    #[must_use]
    pub fn apply(&self, config: &CakeConfig) -> CakeConfig {
        match self {
            Self::AddTier => config.with_tier_added(),
            Self::RemoveTier => config.with_tier_removed(),
            Self::SetTierWidth { index, width } => config.with_tier_width(*index, *width),
            Self::SetTierHeight { index, height } => config.with_tier_height(*index, *height),
            Self::SetTierFlavor { index, flavor } => config.with_tier_flavor(*index, flavor),
            Self::SetShape { shape } => config.with_shape(*shape),
            Self::SetFrosting { frosting } => config.with_frosting(frosting),
            Self::SetCoverage { coverage } => config.with_coverage(*coverage),
            Self::SetTexture { texture } => config.with_texture(texture),
            Self::ToggleTopping { name } => config.with_topping_toggled(name),
            Self::AdjustTopping { name, delta } => config.with_topping_adjusted(name, *delta),
            Self::SetMessageText { text } => config.with_message_text(text),
            Self::SetMessageColor { color } => config.with_message_color(color),
            Self::SetMessageFont { font } => config.with_message_font(*font),
            Self::SetMessagePosition { position } => config.with_message_position(*position),
        }
    }

    /// Topping name this edit targets, if any.
    #[must_use]
    pub fn topping_name(&self) -> Option<&str> {
        match self {
            Self::ToggleTopping { name } | Self::AdjustTopping { name, .. } => Some(name),
            _ => None,
        }
    }
}
