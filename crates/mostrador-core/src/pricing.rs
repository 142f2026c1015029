//! # Pricing Engine
//!
//! Turns a list of line items and an optional promotion into a priced cart.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        compute_totals                                   │
//! │                                                                         │
//! │   subtotal = Σ unit_price × quantity                                    │
//! │                                                                         │
//! │   discount = match rule {                                               │
//! │       PercentOff { rate }      → subtotal × rate                        │
//! │       FixedAmountOff { amount} → amount                                 │
//! │       FreeItem { threshold }   → if Σ quantity ≥ threshold              │
//! │                                    then min(unit_price) else 0          │
//! │       (no promotion)           → 0                                      │
//! │   }                                                                     │
//! │                                                                         │
//! │   discount = min(discount, subtotal)                                    │
//! │   total    = subtotal − discount                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is total and free of side effects. Positivity of a
//! promotion's value is checked in [`crate::validation`], not here.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::LineItem;
use crate::money::{div_round_half_away, Money, Percent, BPS_PER_WHOLE};
use crate::types::{Promotion, PromotionRule};

// =============================================================================
// Priced Cart
// =============================================================================

/// Derived totals of a cart. Recomputed on every change, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricedCart {
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}

/// Prices `items` under an optional promotion.
///
/// ## Example
/// ```rust
/// use mostrador_core::{compute_totals, Money, Percent, PromotionRule};
/// use mostrador_core::pricing::discount_for;
///
/// let rule = PromotionRule::PercentOff { rate: Percent::from_whole(15) };
/// assert_eq!(discount_for(&rule, &[]), Money::zero());
///
/// let priced = compute_totals(&[], None);
/// assert_eq!(priced.total, Money::zero());
/// ```
pub fn compute_totals(items: &[LineItem], promotion: Option<&Promotion>) -> PricedCart {
    let subtotal = subtotal_of(items);

    let discount = promotion
        .map(|p| discount_for(&p.rule, items))
        .unwrap_or_default()
        .min(subtotal);

    PricedCart {
        subtotal,
        discount,
        total: subtotal - discount,
    }
}

/// Σ unit_price × quantity.
pub fn subtotal_of(items: &[LineItem]) -> Money {
    items.iter().map(LineItem::line_total).sum()
}

/// Raw discount a rule grants on `items`, before clamping to the subtotal.
pub fn discount_for(rule: &PromotionRule, items: &[LineItem]) -> Money {
    match rule {
        PromotionRule::PercentOff { rate } => subtotal_of(items).percent_of(*rate),
        PromotionRule::FixedAmountOff { amount } => *amount,
        PromotionRule::FreeItem { .. } => {
            let threshold = rule.free_item_threshold().unwrap_or_default();
            let units: u64 = items.iter().map(|item| u64::from(item.quantity)).sum();

            if units >= u64::from(threshold) {
                items
                    .iter()
                    .map(|item| item.unit_price)
                    .min()
                    .unwrap_or_default()
            } else {
                Money::zero()
            }
        }
    }
}

// =============================================================================
// Margin
// =============================================================================

/// Per-unit profit of a variant and its margin over the selling price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Margin {
    pub profit: Money,
    /// `None` when the price is zero.
    pub percent: Option<Percent>,
}

impl Margin {
    /// Computes `price − cost` and `(price − cost) / price`.
    ///
    /// ```rust
    /// use mostrador_core::{Margin, Money, Percent};
    ///
    /// let margin = Margin::of(Money::from_major(200), Money::from_major(150));
    /// assert_eq!(margin.profit, Money::from_major(50));
    /// assert_eq!(margin.percent, Some(Percent::from_whole(25)));
    ///
    /// assert_eq!(Margin::of(Money::zero(), Money::from_major(5)).percent, None);
    /// ```
    pub fn of(price: Money, cost: Money) -> Self {
        let profit = price - cost;

        let percent = if price.is_zero() {
            None
        } else {
            let scaled = profit.cents() as i128 * BPS_PER_WHOLE as i128;
            let bps = div_round_half_away(scaled, price.cents() as i128);
            Some(Percent::from_bps(bps as i64))
        };

        Margin { profit, percent }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PromotionWindow;
    use chrono::Utc;

    fn item(id: &str, price: i64, quantity: u32) -> LineItem {
        LineItem {
            variant_id: id.to_string(),
            product_name: format!("Product {}", id),
            variant_name: "Adulto".to_string(),
            category: "Ropa".to_string(),
            unit_price: Money::from_major(price),
            unit_cost: Money::from_major(price / 2),
            quantity,
        }
    }

    fn promotion(rule: PromotionRule) -> Promotion {
        let now = Utc::now();
        Promotion {
            id: "promo".to_string(),
            name: "Test".to_string(),
            description: None,
            rule,
            window: PromotionWindow::always(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn percent_off(whole: i64) -> Promotion {
        promotion(PromotionRule::PercentOff {
            rate: Percent::from_whole(whole),
        })
    }

    fn fixed_off(major: i64) -> Promotion {
        promotion(PromotionRule::FixedAmountOff {
            amount: Money::from_major(major),
        })
    }

    fn free_item(threshold: Option<u32>) -> Promotion {
        promotion(PromotionRule::FreeItem { threshold })
    }

    #[test]
    fn test_no_promotion() {
        let items = vec![item("a", 10, 2), item("b", 5, 1)];
        let priced = compute_totals(&items, None);

        assert_eq!(priced.subtotal, Money::from_major(25));
        assert_eq!(priced.discount, Money::zero());
        assert_eq!(priced.total, Money::from_major(25));
    }

    #[test]
    fn test_percent_off() {
        let items = vec![item("a", 100, 1)];
        let priced = compute_totals(&items, Some(&percent_off(15)));

        assert_eq!(priced.subtotal, Money::from_major(100));
        assert_eq!(priced.discount, Money::from_major(15));
        assert_eq!(priced.total, Money::from_major(85));
    }

    #[test]
    fn test_percent_off_clamped_to_subtotal() {
        let items = vec![item("a", 40, 1)];
        let priced = compute_totals(&items, Some(&percent_off(150)));

        assert_eq!(priced.discount, Money::from_major(40));
        assert_eq!(priced.total, Money::zero());
    }

    #[test]
    fn test_fixed_amount_clamped_to_subtotal() {
        let items = vec![item("a", 30, 1)];
        let priced = compute_totals(&items, Some(&fixed_off(50)));

        assert_eq!(priced.subtotal, Money::from_major(30));
        assert_eq!(priced.discount, Money::from_major(30));
        assert_eq!(priced.total, Money::zero());
    }

    #[test]
    fn test_fixed_amount_under_subtotal() {
        let items = vec![item("a", 80, 1)];
        let priced = compute_totals(&items, Some(&fixed_off(50)));

        assert_eq!(priced.discount, Money::from_major(50));
        assert_eq!(priced.total, Money::from_major(30));
    }

    #[test]
    fn test_free_item_at_threshold() {
        let items = vec![item("a", 10, 3), item("b", 5, 2)];
        let priced = compute_totals(&items, Some(&free_item(None)));

        assert_eq!(priced.subtotal, Money::from_major(40));
        assert_eq!(priced.discount, Money::from_major(5));
        assert_eq!(priced.total, Money::from_major(35));
    }

    #[test]
    fn test_free_item_below_threshold() {
        let items = vec![item("a", 10, 3), item("b", 5, 1)];
        let priced = compute_totals(&items, Some(&free_item(None)));

        assert_eq!(priced.discount, Money::zero());
        assert_eq!(priced.total, Money::from_major(35));
    }

    #[test]
    fn test_free_item_custom_threshold() {
        let items = vec![item("a", 10, 1), item("b", 7, 1)];

        let priced = compute_totals(&items, Some(&free_item(Some(2))));
        assert_eq!(priced.discount, Money::from_major(7));

        let priced = compute_totals(&items, Some(&free_item(Some(3))));
        assert_eq!(priced.discount, Money::zero());
    }

    #[test]
    fn test_free_item_is_one_unit_not_one_line() {
        // cheapest line has quantity 4, only one unit of it is free
        let items = vec![item("a", 3, 4), item("b", 20, 1)];
        let priced = compute_totals(&items, Some(&free_item(None)));

        assert_eq!(priced.discount, Money::from_major(3));
    }

    #[test]
    fn test_empty_cart_with_every_kind() {
        for promo in [percent_off(15), fixed_off(50), free_item(None), free_item(Some(0))] {
            let priced = compute_totals(&[], Some(&promo));
            assert_eq!(priced, PricedCart::default());
        }
    }

    #[test]
    fn test_zero_value_promotions() {
        let items = vec![item("a", 12, 2)];
        for promo in [percent_off(0), fixed_off(0)] {
            let priced = compute_totals(&items, Some(&promo));
            assert_eq!(priced.discount, Money::zero());
            assert_eq!(priced.total, priced.subtotal);
        }
    }

    #[test]
    fn test_discount_never_exceeds_subtotal() {
        let carts = vec![
            vec![],
            vec![item("a", 1, 1)],
            vec![item("a", 10, 3), item("b", 5, 2)],
            vec![item("a", 0, 6)],
        ];
        let promos = [
            percent_off(15),
            percent_off(100),
            percent_off(250),
            fixed_off(1),
            fixed_off(10_000),
            free_item(None),
            free_item(Some(1)),
        ];

        for items in &carts {
            for promo in &promos {
                let priced = compute_totals(items, Some(promo));
                assert!(priced.discount <= priced.subtotal);
                assert!(!priced.total.is_negative());
                assert_eq!(priced.total, priced.subtotal - priced.discount);
            }
        }
    }

    #[test]
    fn test_compute_totals_is_idempotent() {
        let items = vec![item("a", 10, 3), item("b", 5, 2)];
        let promo = percent_off(12);

        let first = compute_totals(&items, Some(&promo));
        let second = compute_totals(&items, Some(&promo));
        assert_eq!(first, second);
    }

    #[test]
    fn test_percent_off_rounds_to_cents() {
        let mut line = item("a", 0, 1);
        line.unit_price = Money::from_cents(999);
        let priced = compute_totals(&[line], Some(&percent_off(15)));

        // 149.85 cents rounds to 150
        assert_eq!(priced.discount, Money::from_cents(150));
        assert_eq!(priced.total, Money::from_cents(849));
    }

    #[test]
    fn test_margin() {
        let margin = Margin::of(Money::from_major(250), Money::from_major(120));
        assert_eq!(margin.profit, Money::from_major(130));
        assert_eq!(margin.percent, Some(Percent::from_whole(52)));
    }

    #[test]
    fn test_margin_zero_price() {
        let margin = Margin::of(Money::zero(), Money::from_major(10));
        assert_eq!(margin.profit, Money::from_major(-10));
        assert_eq!(margin.percent, None);
    }

    #[test]
    fn test_margin_selling_at_loss() {
        let margin = Margin::of(Money::from_major(100), Money::from_major(150));
        assert_eq!(margin.percent, Some(Percent::from_whole(-50)));
    }
}
