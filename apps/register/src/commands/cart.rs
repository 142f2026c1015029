//! # Cart Commands
//!
//! Commands that edit the sale being rung up.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Customer │────►│ Finalized│       │
//! │  │  Cart    │     │          │     │  + Promo │     │   Sale   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       finalize_sale                      │
//! │                   remove_from_cart  (sale.rs)                          │
//! │                   set_promotion                                         │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every edit goes through the core reducer; the totals in the response
//! are recomputed from the resulting cart.

use mostrador_core::validation::check_can_add;
use mostrador_core::{CartEvent, CoreError, CustomerDetails, LineItem, Money, PricedCart};
use serde::Serialize;
use tracing::debug;

use super::today;
use crate::error::ApiError;
use crate::state::{ConfigState, SaleDraft, SaleState, Services};

/// One cart line as the register displays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub variant_id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
    pub formatted_line_total: String,
}

impl CartLineView {
    fn new(item: &LineItem, config: &ConfigState) -> Self {
        let line_total = item.line_total();
        CartLineView {
            variant_id: item.variant_id.clone(),
            name: item.display_name(),
            category: item.category.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total,
            formatted_line_total: config.format_money(line_total),
        }
    }
}

/// The promotion applied to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionSummary {
    pub id: String,
    pub name: String,
    pub label: String,
}

/// Cart response including items, promotion and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineView>,
    pub promotion: Option<PromotionSummary>,
    pub totals: PricedCart,
    pub formatted_subtotal: String,
    pub formatted_discount: String,
    pub formatted_total: String,
    pub line_count: usize,
    pub total_units: u64,
    pub customer: CustomerDetails,
}

impl CartResponse {
    pub fn new(draft: &SaleDraft, config: &ConfigState) -> Self {
        let cart = &draft.cart;
        let totals = cart.priced();

        CartResponse {
            items: cart
                .items()
                .iter()
                .map(|item| CartLineView::new(item, config))
                .collect(),
            promotion: cart.promotion().map(|p| PromotionSummary {
                id: p.id.clone(),
                name: p.name.clone(),
                label: p.rule.label(),
            }),
            totals,
            formatted_subtotal: config.format_money(totals.subtotal),
            formatted_discount: config.format_money(totals.discount),
            formatted_total: config.format_money(totals.total),
            line_count: cart.line_count(),
            total_units: cart.total_units(),
            customer: draft.customer.clone(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(sale: &SaleState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    sale.with_draft(|draft| CartResponse::new(draft, config))
}

/// Adds one unit of a catalog variant to the cart.
///
/// ## Behavior
/// - Variant already in cart: quantity increases by one
/// - Variant not in cart: appended with its current price and cost frozen
/// - Cart or line over the configured limit: `CART_ERROR`, cart untouched
pub async fn add_to_cart(
    services: &Services,
    sale: &SaleState,
    config: &ConfigState,
    variant_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(variant_id = %variant_id, "add_to_cart command");

    let entry = services
        .catalog
        .list_catalog_entries()
        .await?
        .into_iter()
        .find(|e| e.variant_id == variant_id)
        .ok_or_else(|| CoreError::VariantNotFound(variant_id.to_string()))?;

    let limits = config.cart_limits();
    sale.with_draft_mut(|draft| {
        check_can_add(&draft.cart, variant_id, limits)?;
        draft.cart = draft.cart.apply(CartEvent::AddItem(entry));
        Ok::<CartResponse, CoreError>(CartResponse::new(draft, config))
    })
    .map_err(ApiError::from)
}

/// Removes a whole line from the cart. Unknown ids are a no-op.
pub fn remove_from_cart(sale: &SaleState, config: &ConfigState, variant_id: &str) -> CartResponse {
    debug!(variant_id = %variant_id, "remove_from_cart command");

    sale.dispatch(CartEvent::RemoveItem(variant_id.to_string()));
    get_cart(sale, config)
}

/// Selects a promotion, or clears it with `None`.
///
/// ## Behavior
/// - The promotion must be in the active listing and inside its date window
///   today, otherwise `BUSINESS_LOGIC` and the cart keeps its promotion
/// - Selecting replaces any previous promotion; totals are recomputed
pub async fn set_promotion(
    services: &Services,
    sale: &SaleState,
    config: &ConfigState,
    promotion_id: Option<&str>,
) -> Result<CartResponse, ApiError> {
    debug!(promotion_id = ?promotion_id, "set_promotion command");

    let promotion = match promotion_id {
        None => None,
        Some(id) => {
            let date = today();
            let promotion = services
                .promotions
                .list_active_promotions()
                .await?
                .into_iter()
                .find(|p| p.id == id)
                .filter(|p| p.is_available_on(date))
                .ok_or_else(|| CoreError::PromotionNotAvailable(id.to_string()))?;
            Some(promotion)
        }
    };

    sale.dispatch(CartEvent::SetPromotion(promotion));
    Ok(get_cart(sale, config))
}

/// Stores the customer typed at the register. Checked at finalize time.
pub fn set_customer(
    sale: &SaleState,
    config: &ConfigState,
    name: &str,
    phone: Option<&str>,
) -> CartResponse {
    debug!(has_phone = phone.is_some(), "set_customer command");

    sale.set_customer(CustomerDetails {
        name: name.to_string(),
        phone: phone.map(str::to_string),
    });
    get_cart(sale, config)
}

/// Empties the cart and drops the promotion. The customer is kept.
pub fn clear_cart(sale: &SaleState, config: &ConfigState) -> CartResponse {
    debug!("clear_cart command");

    sale.dispatch(CartEvent::Clear);
    get_cart(sale, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixture;
    use crate::error::ErrorCode;
    use mostrador_backend::seed::{DINO_BEBE, DINO_PEQUE, GORRO_BEBE, PROMO_APERTURA, PROMO_LLEVA_5};
    use mostrador_backend::{BackendError, Operation, PromotionService};
    use mostrador_core::PromotionChanges;

    #[tokio::test]
    async fn test_add_twice_merges_line() {
        let f = fixture::demo();

        add_to_cart(&f.services, &f.sale, &f.config, DINO_BEBE)
            .await
            .unwrap();
        let cart = add_to_cart(&f.services, &f.sale, &f.config, DINO_BEBE)
            .await
            .unwrap();

        assert_eq!(cart.line_count, 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.totals.subtotal, Money::from_major(360));
        assert_eq!(cart.formatted_total, "$360.00");
    }

    #[tokio::test]
    async fn test_add_unknown_variant() {
        let f = fixture::demo();

        let err = add_to_cart(&f.services, &f.sale, &f.config, "nope")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(f.sale.snapshot().cart.is_empty());
    }

    #[tokio::test]
    async fn test_add_respects_line_limit() {
        let mut f = fixture::demo();
        f.config.cart.max_lines = 1;

        add_to_cart(&f.services, &f.sale, &f.config, DINO_BEBE)
            .await
            .unwrap();
        let err = add_to_cart(&f.services, &f.sale, &f.config, DINO_PEQUE)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(get_cart(&f.sale, &f.config).line_count, 1);
    }

    #[tokio::test]
    async fn test_add_respects_quantity_limit() {
        let mut f = fixture::demo();
        f.config.cart.max_item_quantity = 2;

        for _ in 0..2 {
            add_to_cart(&f.services, &f.sale, &f.config, GORRO_BEBE)
                .await
                .unwrap();
        }
        let err = add_to_cart(&f.services, &f.sale, &f.config, GORRO_BEBE)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(f.sale.snapshot().cart.quantity_of(GORRO_BEBE), 2);
    }

    #[tokio::test]
    async fn test_add_when_catalog_unavailable() {
        let f = fixture::demo();
        f.backend
            .fail_next(
                Operation::ListCatalogEntries,
                BackendError::Unavailable("timeout".to_string()),
            )
            .await;

        let err = add_to_cart(&f.services, &f.sale, &f.config, DINO_BEBE)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ServiceUnavailable);
        assert!(f.sale.snapshot().cart.is_empty());
    }

    #[tokio::test]
    async fn test_remove_then_add_resets_quantity() {
        let f = fixture::demo();

        for _ in 0..3 {
            add_to_cart(&f.services, &f.sale, &f.config, DINO_BEBE)
                .await
                .unwrap();
        }
        remove_from_cart(&f.sale, &f.config, DINO_BEBE);
        let cart = add_to_cart(&f.services, &f.sale, &f.config, DINO_BEBE)
            .await
            .unwrap();

        assert_eq!(cart.items[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_percent_promotion() {
        let f = fixture::demo();

        // Camiseta Dino Bebé is 180.00; 15% of it is 27.00.
        add_to_cart(&f.services, &f.sale, &f.config, DINO_BEBE)
            .await
            .unwrap();
        let cart = set_promotion(&f.services, &f.sale, &f.config, Some(PROMO_APERTURA))
            .await
            .unwrap();

        assert_eq!(cart.totals.discount, Money::from_major(27));
        assert_eq!(cart.totals.total, Money::from_major(153));
        assert_eq!(cart.promotion.unwrap().label, "15%");
    }

    #[tokio::test]
    async fn test_free_item_promotion() {
        let f = fixture::demo();

        for _ in 0..4 {
            add_to_cart(&f.services, &f.sale, &f.config, DINO_BEBE)
                .await
                .unwrap();
        }
        let cart = set_promotion(&f.services, &f.sale, &f.config, Some(PROMO_LLEVA_5))
            .await
            .unwrap();
        assert!(cart.totals.discount.is_zero());

        // Fifth unit is a 90.00 hat, the cheapest unit in the cart.
        let cart = add_to_cart(&f.services, &f.sale, &f.config, GORRO_BEBE)
            .await
            .unwrap();
        assert_eq!(cart.totals.discount, Money::from_major(90));
    }

    #[tokio::test]
    async fn test_inactive_promotion_is_rejected() {
        let f = fixture::demo();
        set_promotion(&f.services, &f.sale, &f.config, Some(PROMO_APERTURA))
            .await
            .unwrap();
        f.backend
            .set_promotion_active(PROMO_LLEVA_5, false)
            .await
            .unwrap();

        let err = set_promotion(&f.services, &f.sale, &f.config, Some(PROMO_LLEVA_5))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::BusinessLogic);
        let draft = f.sale.snapshot();
        assert_eq!(draft.cart.promotion().unwrap().id, PROMO_APERTURA);
    }

    #[tokio::test]
    async fn test_expired_promotion_is_rejected() {
        let f = fixture::demo();
        let yesterday = today().pred_opt().unwrap();
        f.backend
            .update_promotion(
                PROMO_APERTURA,
                PromotionChanges {
                    window: Some(mostrador_core::PromotionWindow {
                        starts_on: None,
                        ends_on: Some(yesterday),
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = set_promotion(&f.services, &f.sale, &f.config, Some(PROMO_APERTURA))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[tokio::test]
    async fn test_clear_promotion() {
        let f = fixture::demo();
        add_to_cart(&f.services, &f.sale, &f.config, DINO_BEBE)
            .await
            .unwrap();
        set_promotion(&f.services, &f.sale, &f.config, Some(PROMO_APERTURA))
            .await
            .unwrap();

        let cart = set_promotion(&f.services, &f.sale, &f.config, None)
            .await
            .unwrap();

        assert!(cart.promotion.is_none());
        assert_eq!(cart.totals.total, cart.totals.subtotal);
    }

    #[tokio::test]
    async fn test_clear_cart_keeps_customer() {
        let f = fixture::demo();
        add_to_cart(&f.services, &f.sale, &f.config, DINO_BEBE)
            .await
            .unwrap();
        set_customer(&f.sale, &f.config, "Ana", Some("5550101"));

        let cart = clear_cart(&f.sale, &f.config);

        assert!(cart.items.is_empty());
        assert_eq!(cart.customer.name, "Ana");
        assert_eq!(cart.totals, PricedCart::default());
    }
}
