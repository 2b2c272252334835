//! Configuration state manager.
//!
//! DESIGN
//! ======
//! `ConfigEditor` is the single source of truth for one editing session. It
//! owns the catalog, a price table derived from it, and the undo/redo history
//! of configurations. [`ConfigEditor::set_config`] is the only path that
//! changes the current value; every higher-level edit builds a complete next
//! configuration and funnels it through there, so each edit is one history
//! entry and price is always a function of the entry at the cursor.
//!
//! Out-of-range requests (undo at the oldest entry, a sixth tier, an unknown
//! topping) are absorbed as no-ops and reported as `false`.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::config::{CakeConfig, CakeShape, ConfigError, Edit, FrostingCoverage, MessageFont};
use crate::history::History;
use crate::pricing::{PriceBreakdown, PriceTable};

pub struct ConfigEditor {
    catalog: Arc<Catalog>,
    prices: PriceTable,
    history: History<CakeConfig>,
}

impl ConfigEditor {
    /// Start a session. With no initial configuration the catalog default is
    /// used. An initial configuration whose toppings do not match the catalog
    /// is reconciled as a second, undoable entry.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, initial: Option<CakeConfig>) -> Self {
        let seed = initial.unwrap_or_else(|| CakeConfig::default_for(&catalog));
        let mut editor = Self { prices: PriceTable::from_catalog(&catalog), catalog, history: History::new(seed) };
        editor.reconcile_toppings();
        editor
    }

    // --- Core state transitions ---

    /// Commit `next` as the newest history entry. Returns false when `next`
    /// equals the current configuration.
    pub fn set_config(&mut self, next: CakeConfig) -> bool {
        self.history.push(next)
    }

    /// Reconcile `next` with the catalog's toppings and validate it before
    /// committing. Use for configurations that did not come from this
    /// editor's own helpers; topping names the catalog does not offer are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `next` breaks the configuration contract.
    pub fn try_set_config(&mut self, next: CakeConfig) -> Result<bool, ConfigError> {
        let next = if next.toppings_match(&self.catalog) {
            next
        } else {
            debug!(incoming = next.toppings.len(), "reconciling incoming configuration with catalog");
            next.with_toppings_reconciled(&self.catalog)
        };
        next.validate()?;
        Ok(self.set_config(next))
    }

    /// Replace the whole history with a fresh default configuration.
    pub fn reset(&mut self) {
        self.history.reset(CakeConfig::default_for(&self.catalog));
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &CakeConfig {
        self.history.current()
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.history.cursor()
    }

    /// Price of the current configuration.
    #[must_use]
    pub fn price(&self) -> u32 {
        self.prices.quote(self.config())
    }

    #[must_use]
    pub fn breakdown(&self) -> PriceBreakdown {
        self.prices.breakdown(self.config())
    }

    // --- Catalog ---

    /// Swap in a refreshed catalog, rebuild prices, and reconcile toppings.
    pub fn set_catalog(&mut self, catalog: Arc<Catalog>) {
        self.prices = PriceTable::from_catalog(&catalog);
        self.catalog = catalog;
        self.reconcile_toppings();
    }

    /// Align the configured toppings with the catalog's topping names.
    /// Returns true when a reconciled entry was committed.
    pub fn reconcile_toppings(&mut self) -> bool {
        if self.config().toppings_match(&self.catalog) {
            return false;
        }
        let next = self.config().with_toppings_reconciled(&self.catalog);
        debug!(
            before = self.config().toppings.len(),
            after = next.toppings.len(),
            "reconciling toppings with catalog"
        );
        self.set_config(next)
    }

    // --- Edits ---

    /// Apply an edit. Topping edits naming a topping the catalog does not
    /// offer are ignored.
    pub fn apply(&mut self, edit: &Edit) -> bool {
        if let Some(name) = edit.topping_name() {
            if self.catalog.topping(name).is_none() {
                debug!(topping = name, "ignoring edit for topping absent from catalog");
                return false;
            }
        }
        let next = edit.apply(self.config());
        self.set_config(next)
    }

    pub fn add_tier(&mut self) -> bool {
        self.apply(&Edit::AddTier)
    }

    pub fn remove_tier(&mut self) -> bool {
        self.apply(&Edit::RemoveTier)
    }

    pub fn set_tier_width(&mut self, index: usize, width: f64) -> bool {
        self.apply(&Edit::SetTierWidth { index, width })
    }

    pub fn set_tier_height(&mut self, index: usize, height: f64) -> bool {
        self.apply(&Edit::SetTierHeight { index, height })
    }

    pub fn set_tier_flavor(&mut self, index: usize, flavor: &str) -> bool {
        self.apply(&Edit::SetTierFlavor { index, flavor: flavor.to_owned() })
    }

    pub fn set_shape(&mut self, shape: CakeShape) -> bool {
        self.apply(&Edit::SetShape { shape })
    }

    pub fn set_frosting(&mut self, frosting: &str) -> bool {
        self.apply(&Edit::SetFrosting { frosting: frosting.to_owned() })
    }

    pub fn set_coverage(&mut self, coverage: FrostingCoverage) -> bool {
        self.apply(&Edit::SetCoverage { coverage })
    }

    pub fn set_texture(&mut self, texture: &str) -> bool {
        self.apply(&Edit::SetTexture { texture: texture.to_owned() })
    }

    pub fn toggle_topping(&mut self, name: &str) -> bool {
        self.apply(&Edit::ToggleTopping { name: name.to_owned() })
    }

    pub fn adjust_topping(&mut self, name: &str, delta: i32) -> bool {
        self.apply(&Edit::AdjustTopping { name: name.to_owned(), delta })
    }

    pub fn set_message_text(&mut self, text: &str) -> bool {
        self.apply(&Edit::SetMessageText { text: text.to_owned() })
    }

    pub fn set_message_color(&mut self, color: &str) -> bool {
        self.apply(&Edit::SetMessageColor { color: color.to_owned() })
    }

    pub fn set_message_font(&mut self, font: MessageFont) -> bool {
        self.apply(&Edit::SetMessageFont { font })
    }

    pub fn set_message_position(&mut self, position: [f64; 2]) -> bool {
        self.apply(&Edit::SetMessagePosition { position })
    }
}
