//! Catalog of purchasable options.
//!
//! The catalog is supplied by an external provider as a flat `Asset[]` JSON
//! array. [`Catalog::from_assets`] groups it into typed option lists that the
//! pricing table, the editor, and the placement planner all read from. The
//! catalog is immutable once built; a refreshed catalog replaces it wholesale.
//!
//! Every lookup returns `Option` so that catalog drift (an asset removed
//! mid-session) degrades to a documented default instead of failing.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::{Deserialize, Serialize};

/// Category of a catalog asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Shape,
    Flavor,
    Frosting,
    Size,
    LayerHeight,
    Topper,
    Decoration,
    Texture,
}

/// Optional per-kind attributes attached to an asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    /// Numeric value: inches for sizes and layer heights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Price multiplier, used by shapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    /// Whether a topping is counted (`true`) or toggled (`false`/absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_countable: Option<bool>,
    /// UI tab the asset is listed under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Display color as a hex string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_url: Option<String>,
}

/// One purchasable option as delivered by the catalog provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    #[serde(default)]
    pub price_modifier: f64,
    #[serde(default)]
    pub metadata: AssetMetadata,
}

impl Asset {
    /// Whether this asset is a countable topping.
    #[must_use]
    pub fn is_countable(&self) -> bool {
        self.metadata.is_countable.unwrap_or(false)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Assets grouped by kind, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub shapes: Vec<Asset>,
    pub flavors: Vec<Asset>,
    pub frostings: Vec<Asset>,
    pub sizes: Vec<Asset>,
    pub heights: Vec<Asset>,
    /// Toppers and decorations together.
    pub toppings: Vec<Asset>,
    pub textures: Vec<Asset>,
}

impl Catalog {
    /// An empty catalog, used before the provider has responded.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Group a flat asset list into typed option lists.
    #[must_use]
    pub fn from_assets(assets: Vec<Asset>) -> Self {
        let mut catalog = Self::default();
        for asset in assets {
            let list = match asset.kind {
                AssetKind::Shape => &mut catalog.shapes,
                AssetKind::Flavor => &mut catalog.flavors,
                AssetKind::Frosting => &mut catalog.frostings,
                AssetKind::Size => &mut catalog.sizes,
                AssetKind::LayerHeight => &mut catalog.heights,
                AssetKind::Topper | AssetKind::Decoration => &mut catalog.toppings,
                AssetKind::Texture => &mut catalog.textures,
            };
            list.push(asset);
        }
        catalog
    }

    /// Parse a provider `Asset[]` JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the document is not a valid asset array.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let assets: Vec<Asset> = serde_json::from_str(raw)?;
        Ok(Self::from_assets(assets))
    }

    /// False until both shapes and flavors are present. Pricing collapses to
    /// the base fee in this state.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.shapes.is_empty() && !self.flavors.is_empty()
    }

    /// Topping names in catalog order.
    pub fn topping_names(&self) -> impl Iterator<Item = &str> {
        self.toppings.iter().map(|a| a.name.as_str())
    }

    /// Look up a topping by exact name.
    #[must_use]
    pub fn topping(&self, name: &str) -> Option<&Asset> {
        self.toppings.iter().find(|a| a.name == name)
    }

    /// Whether `name` is a countable topping. Unknown names are not countable.
    #[must_use]
    pub fn is_countable(&self, name: &str) -> bool {
        self.topping(name).is_some_and(Asset::is_countable)
    }

    /// Case-insensitive flavor lookup.
    #[must_use]
    pub fn flavor(&self, name: &str) -> Option<&Asset> {
        find_ignore_case(&self.flavors, name)
    }

    /// Case-insensitive frosting lookup.
    #[must_use]
    pub fn frosting(&self, name: &str) -> Option<&Asset> {
        find_ignore_case(&self.frostings, name)
    }

    /// Exact-name texture lookup.
    #[must_use]
    pub fn texture(&self, name: &str) -> Option<&Asset> {
        self.textures.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub fn frosting_color(&self, name: &str) -> Option<&str> {
        self.frosting(name).and_then(|a| a.metadata.color.as_deref())
    }

    #[must_use]
    pub fn flavor_color(&self, name: &str) -> Option<&str> {
        self.flavor(name).and_then(|a| a.metadata.color.as_deref())
    }

    #[must_use]
    pub fn topping_color(&self, name: &str) -> Option<&str> {
        self.topping(name).and_then(|a| a.metadata.color.as_deref())
    }

    #[must_use]
    pub fn texture_url(&self, name: &str) -> Option<&str> {
        self.texture(name).and_then(|a| a.metadata.texture_url.as_deref())
    }
}

fn find_ignore_case<'a>(assets: &'a [Asset], name: &str) -> Option<&'a Asset> {
    assets.iter().find(|a| a.name.eq_ignore_ascii_case(name))
}
