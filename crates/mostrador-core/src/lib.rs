//! # mostrador-core: Pure Business Logic for Mostrador POS
//!
//! This crate holds the pricing engine and every rule the register checks
//! before talking to the data service. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Mostrador POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    register (apps/register)                     │   │
//! │  │    catalog ──► add/remove ──► promotion ──► checkout ──► report │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ mostrador-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ Promotion │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │ SaleRecord│  │  Percent  │  │ CartEvent │  │  limits   │  │   │
//! │  │   └───────────┘  └───────────┘  └─────┬─────┘  └───────────┘  │   │
//! │  │                                 ┌─────▼─────┐                   │   │
//! │  │                                 │  pricing  │                   │   │
//! │  │                                 │ PricedCart│                   │   │
//! │  │                                 └───────────┘                   │   │
//! │  │   NO I/O • NO BACKEND • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              mostrador-backend (service contracts)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money` (cents) and `Percent` (basis points)
//! - [`types`] - Catalog, promotion, customer and sale types
//! - [`cart`] - Immutable `Cart` and its reducer
//! - [`pricing`] - `compute_totals` and margin math
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use mostrador_core::{
//!     Cart, CartEvent, CatalogEntry, Money, Percent, Promotion, PromotionRule,
//!     PromotionWindow,
//! };
//!
//! let entry = CatalogEntry {
//!     variant_id: "v-1".into(),
//!     product_id: "p-1".into(),
//!     product_name: "Mameluco".into(),
//!     variant_name: "Bebé".into(),
//!     category: "Ropa".into(),
//!     category_color: "#6B5B95".into(),
//!     description: None,
//!     unit_price: Money::from_major(100),
//!     unit_cost: Money::from_major(60),
//! };
//! let promo = Promotion {
//!     id: "promo-1".into(),
//!     name: "Apertura".into(),
//!     description: None,
//!     rule: PromotionRule::PercentOff { rate: Percent::from_whole(15) },
//!     window: PromotionWindow::always(),
//!     active: true,
//!     created_at: Utc::now(),
//!     updated_at: Utc::now(),
//! };
//!
//! let cart = Cart::new()
//!     .apply(CartEvent::AddItem(entry))
//!     .apply(CartEvent::SetPromotion(Some(promo)));
//!
//! let priced = cart.priced();
//! assert_eq!(priced.subtotal, Money::from_major(100));
//! assert_eq!(priced.discount, Money::from_major(15));
//! assert_eq!(priced.total, Money::from_major(85));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{reduce, Cart, CartEvent, LineItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Percent};
pub use pricing::{compute_totals, Margin, PricedCart};
pub use types::*;
pub use validation::{CartLimits, ValidationResult};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines in a single cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// Catches slips like scanning the same item a thousand times.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Units a cart needs before a free-item promotion applies, unless the
/// promotion sets its own threshold.
pub const FREE_ITEM_THRESHOLD: u32 = 5;
