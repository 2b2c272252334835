//! Cake configuration, pricing, and placement engine.
//!
//! This crate is the policy core of the cake designer. It owns the editable
//! cake configuration with linear undo/redo, derives a deterministic price
//! from it, and plans where every tier and decoration goes in a 3D scene. It
//! performs no I/O: the catalog arrives already fetched, and the plan is handed
//! to whatever renderer the host uses.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Purchasable options grouped by kind, with lenient lookups |
//! | [`config`] | The configuration value, its copy-with-change helpers, and [`config::Edit`] |
//! | [`history`] | Bounded linear undo/redo of snapshots |
//! | [`pricing`] | Price table built from the catalog and the pricing formula |
//! | [`editor`] | [`editor::ConfigEditor`], the per-session state manager |
//! | [`footprint`] | Perimeter, boundary, and interior-point math per shape |
//! | [`placement`] | Zones, decoration kinds, and the tier stack |
//! | [`planner`] | [`planner::PlacementPlanner`], configuration to placement plan |
//! | [`consts`] | Shared numeric constants (fees, limits, scale factors, etc.) |

pub mod catalog;
pub mod config;
pub mod consts;
pub mod editor;
pub mod footprint;
pub mod history;
pub mod placement;
pub mod planner;
pub mod pricing;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{Asset, AssetKind, AssetMetadata, Catalog, CatalogError};
pub use config::{CakeConfig, CakeShape, ConfigError, Edit, FrostingCoverage, MessageConfig, MessageFont, Tier, ToppingValue};
pub use editor::ConfigEditor;
pub use planner::{PlacementPlan, PlacementPlanner};
pub use pricing::{PriceBreakdown, PriceTable};
