//! # Domain Types
//!
//! Core domain types used throughout Mostrador POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogEntry   │   │    Promotion    │   │   SaleRecord    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  variant_id     │   │  id             │   │  id             │       │
//! │  │  product_name   │   │  rule ──────────┼─┐ │  ticket_number  │       │
//! │  │  variant_name   │   │  window         │ │ │  subtotal       │       │
//! │  │  unit_price     │   │  active         │ │ │  discount       │       │
//! │  │  unit_cost      │   └─────────────────┘ │ │  total          │       │
//! │  └─────────────────┘                       │ └─────────────────┘       │
//! │                        ┌───────────────────▼─┐                         │
//! │                        │   PromotionRule     │                         │
//! │                        │  PercentOff { rate }│                         │
//! │                        │  FixedAmountOff {…} │                         │
//! │                        │  FreeItem {thresh.} │                         │
//! │                        └─────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every persisted entity carries a string `id` assigned by the data service.
//! A sellable unit is a *variant* (e.g. "Bebé", "Peque", "Adulto") of a
//! product; carts key on `variant_id`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Percent};
use crate::pricing::Margin;
use crate::FREE_ITEM_THRESHOLD;

// =============================================================================
// Catalog
// =============================================================================

/// One sellable variant as the catalog service returns it.
///
/// This is the flattened "complete product" view: product, variant and
/// category data joined into a single row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Unique identifier of the variant. Carts key on this.
    pub variant_id: String,

    /// Product this variant belongs to.
    pub product_id: String,

    /// Product display name.
    pub product_name: String,

    /// Variant display name ("Bebé", "Peque", "Adulto").
    pub variant_name: String,

    /// Category display name.
    pub category: String,

    /// Category color as a CSS hex string.
    pub category_color: String,

    /// Optional product description.
    pub description: Option<String>,

    /// Current selling price.
    pub unit_price: Money,

    /// Current cost (for margin calculations).
    pub unit_cost: Money,
}

impl CatalogEntry {
    /// Profit and margin of one unit at the current price and cost.
    pub fn margin(&self) -> Margin {
        Margin::of(self.unit_price, self.unit_cost)
    }

    /// Case-insensitive match on product name, category or description.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        self.product_name.to_lowercase().contains(&term)
            || self.category.to_lowercase().contains(&term)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// CSS hex color used to group the catalog.
    pub color: String,
    pub active: bool,
}

/// Input for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

/// Default color for categories created from the product form.
pub const DEFAULT_CATEGORY_COLOR: &str = "#6B5B95";

/// Input for creating a product together with its variants.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub variants: Vec<NewVariant>,
}

/// One variant of a [`NewProduct`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewVariant {
    pub name: String,
    pub unit_cost: Money,
    pub unit_price: Money,
}

// =============================================================================
// Promotions
// =============================================================================

/// The three supported promotion kinds, without their values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PromotionKind {
    PercentOff,
    FixedAmountOff,
    FreeItem,
}

impl std::fmt::Display for PromotionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromotionKind::PercentOff => write!(f, "percent_off"),
            PromotionKind::FixedAmountOff => write!(f, "fixed_amount_off"),
            PromotionKind::FreeItem => write!(f, "free_item"),
        }
    }
}

/// How a promotion discounts a cart.
///
/// ## Serialization
/// ```json
/// { "kind": "percent_off", "rate": 1500 }
/// { "kind": "fixed_amount_off", "amount": 5000 }
/// { "kind": "free_item", "threshold": null }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromotionRule {
    /// A percentage of the subtotal.
    PercentOff { rate: Percent },

    /// A flat amount off the subtotal.
    FixedAmountOff { amount: Money },

    /// The cheapest unit is free once the cart holds `threshold` units.
    /// `None` means the store-wide threshold of 5.
    FreeItem { threshold: Option<u32> },
}

impl PromotionRule {
    /// Returns the kind of this rule.
    pub fn kind(&self) -> PromotionKind {
        match self {
            PromotionRule::PercentOff { .. } => PromotionKind::PercentOff,
            PromotionRule::FixedAmountOff { .. } => PromotionKind::FixedAmountOff,
            PromotionRule::FreeItem { .. } => PromotionKind::FreeItem,
        }
    }

    /// Unit count at which a free-item rule kicks in.
    pub fn free_item_threshold(&self) -> Option<u32> {
        match self {
            PromotionRule::FreeItem { threshold } => {
                Some(threshold.unwrap_or(FREE_ITEM_THRESHOLD))
            }
            _ => None,
        }
    }

    /// Short human-readable label for pickers and receipts.
    ///
    /// ## Example
    /// ```rust
    /// use mostrador_core::{Money, Percent, PromotionRule};
    ///
    /// let rule = PromotionRule::PercentOff { rate: Percent::from_whole(15) };
    /// assert_eq!(rule.label(), "15%");
    ///
    /// let rule = PromotionRule::FreeItem { threshold: None };
    /// assert_eq!(rule.label(), "Buy 5, get the cheapest free");
    /// ```
    pub fn label(&self) -> String {
        match self {
            PromotionRule::PercentOff { rate } => rate.to_string(),
            PromotionRule::FixedAmountOff { amount } => amount.to_string(),
            PromotionRule::FreeItem { threshold } => format!(
                "Buy {}, get the cheapest free",
                threshold.unwrap_or(FREE_ITEM_THRESHOLD)
            ),
        }
    }
}

/// Optional inclusive date range during which a promotion may be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PromotionWindow {
    #[ts(as = "Option<String>")]
    pub starts_on: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub ends_on: Option<NaiveDate>,
}

impl PromotionWindow {
    /// A window with no bounds.
    pub const fn always() -> Self {
        PromotionWindow {
            starts_on: None,
            ends_on: None,
        }
    }

    /// Checks whether `date` falls inside the window (bounds inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.starts_on.map_or(true, |start| date >= start)
            && self.ends_on.map_or(true, |end| date <= end)
    }
}

/// A stored promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub rule: PromotionRule,
    pub window: PromotionWindow,
    pub active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Promotion {
    /// True when the promotion is switched on and `date` is inside its window.
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.active && self.window.contains(date)
    }
}

/// Input for creating a promotion.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewPromotion {
    pub name: String,
    pub description: Option<String>,
    pub rule: PromotionRule,
    #[serde(default)]
    pub window: PromotionWindow,
    pub active: bool,
}

/// Partial update of a promotion. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PromotionChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rule: Option<PromotionRule>,
    /// Replaces both bounds when present.
    pub window: Option<PromotionWindow>,
    pub active: Option<bool>,
}

impl PromotionChanges {
    /// Applies the changes to `promotion` in place.
    pub fn apply_to(&self, promotion: &mut Promotion) {
        if let Some(name) = &self.name {
            promotion.name = name.clone();
        }
        if let Some(description) = &self.description {
            promotion.description = Some(description.clone()).filter(|d| !d.trim().is_empty());
        }
        if let Some(rule) = self.rule {
            promotion.rule = rule;
        }
        if let Some(window) = self.window {
            promotion.window = window;
        }
        if let Some(active) = self.active {
            promotion.active = active;
        }
    }
}

// =============================================================================
// Customers and Sales
// =============================================================================

/// Customer details captured at the register before a sale is finalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub name: String,
    pub phone: Option<String>,
}

/// A stored customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
}

/// A recorded sale header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,
    pub ticket_number: String,
    pub customer_id: String,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    pub promotion_id: Option<String>,
    #[ts(as = "String")]
    pub recorded_at: DateTime<Utc>,
}

/// A recorded sale line. Price and cost are frozen at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineRecord {
    pub sale_id: String,
    pub variant_id: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub unit_cost: Money,
}

impl SaleLineRecord {
    /// Cost of goods for this line.
    pub fn line_cost(&self) -> Money {
        self.unit_cost.multiply_quantity(self.quantity)
    }
}

/// What the data service hands back once a sale header is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleReceipt {
    pub sale_id: String,
    pub ticket_number: String,
}

/// Sales summary for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub sale_count: u32,
    /// Σ sale totals.
    pub revenue: Money,
    /// Revenue minus cost of goods sold.
    pub profit: Money,
}

impl DailyReport {
    /// An empty report for `date`.
    pub fn empty(date: NaiveDate) -> Self {
        DailyReport {
            date,
            sale_count: 0,
            revenue: Money::zero(),
            profit: Money::zero(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
