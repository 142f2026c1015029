//! # Cart
//!
//! The in-progress sale as an immutable value plus a pure reducer.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Reducer                                    │
//! │                                                                         │
//! │   Register Action           CartEvent                 Cart'             │
//! │   ───────────────           ─────────                 ─────             │
//! │                                                                         │
//! │   Tap product ────────────► AddItem(entry) ─────────► qty += 1 / push   │
//! │                                                                         │
//! │   Tap remove ─────────────► RemoveItem(id) ─────────► retain(!= id)     │
//! │                                                                         │
//! │   Pick promotion ─────────► SetPromotion(Some(p)) ──► promotion = p     │
//! │                                                                         │
//! │   Abandon / finalize ─────► Clear ──────────────────► Cart::default()   │
//! │                                                                         │
//! │   Every step: cart.priced() == compute_totals(items, promotion)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reducer is total. Cart size limits live in [`crate::validation`] and
//! are checked by the register before an `AddItem` is dispatched.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::{compute_totals, PricedCart};
use crate::types::{CatalogEntry, Promotion};

// =============================================================================
// Line Item
// =============================================================================

/// One line of the cart.
///
/// Price, cost and display names are copied from the catalog entry when the
/// variant is first added. Later catalog edits do not reach a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Cart key. At most one line per variant.
    pub variant_id: String,
    pub product_name: String,
    pub variant_name: String,
    pub category: String,
    pub unit_price: Money,
    /// Informational only; pricing never reads it.
    pub unit_cost: Money,
    pub quantity: u32,
}

impl LineItem {
    /// A new line with quantity 1.
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        LineItem {
            variant_id: entry.variant_id.clone(),
            product_name: entry.product_name.clone(),
            variant_name: entry.variant_name.clone(),
            category: entry.category.clone(),
            unit_price: entry.unit_price,
            unit_cost: entry.unit_cost,
            quantity: 1,
        }
    }

    /// unit_price × quantity
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// "Camiseta Dino (Peque)"
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.product_name, self.variant_name)
    }
}

// =============================================================================
// Cart Events
// =============================================================================

/// Everything that can happen to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Add one unit of a catalog variant.
    AddItem(CatalogEntry),
    /// Drop a variant's line entirely. Unknown ids are ignored.
    RemoveItem(String),
    /// Select or clear the promotion. Lines are untouched.
    SetPromotion(Option<Promotion>),
    /// Empty the cart and clear the promotion.
    Clear,
}

// =============================================================================
// Cart
// =============================================================================

/// The in-progress sale.
///
/// ## Invariants
/// - Lines are unique by `variant_id`
/// - Every line has `quantity >= 1`
/// - Lines keep insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,
    promotion: Option<Promotion>,
}

impl Cart {
    /// An empty cart with no promotion.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Returns the cart that results from `event`. `self` is left as is.
    pub fn apply(&self, event: CartEvent) -> Cart {
        let mut next = self.clone();

        match event {
            CartEvent::AddItem(entry) => {
                match next
                    .items
                    .iter_mut()
                    .find(|line| line.variant_id == entry.variant_id)
                {
                    Some(line) => line.quantity = line.quantity.saturating_add(1),
                    None => next.items.push(LineItem::from_entry(&entry)),
                }
            }
            CartEvent::RemoveItem(variant_id) => {
                next.items.retain(|line| line.variant_id != variant_id);
            }
            CartEvent::SetPromotion(promotion) => {
                next.promotion = promotion;
            }
            CartEvent::Clear => {
                next = Cart::default();
            }
        }

        next
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The selected promotion, if any.
    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    /// Line for a variant, if present.
    pub fn line(&self, variant_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|line| line.variant_id == variant_id)
    }

    /// Current quantity of a variant (0 when absent).
    pub fn quantity_of(&self, variant_id: &str) -> u32 {
        self.line(variant_id).map_or(0, |line| line.quantity)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Σ quantity over every line.
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Subtotal, discount and total for the current lines and promotion.
    pub fn priced(&self) -> PricedCart {
        compute_totals(&self.items, self.promotion.as_ref())
    }
}

/// Free-function form of [`Cart::apply`].
pub fn reduce(cart: &Cart, event: CartEvent) -> Cart {
    cart.apply(event)
}

// =============================================================================
// Unit Tests
// =============================================================================
