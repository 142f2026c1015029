//! # Validation Module
//!
//! Input validation for the register.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Register commands                                            │
//! │  ├── Cart limits before an AddItem is dispatched                       │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Pricing engine                                               │
//! │  └── Accepts anything (total functions, no errors)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Data service                                                 │
//! │  ├── Unique phone per customer                                         │
//! │  └── Referential checks (variant, category, promotion ids)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mostrador_core::validation::{validate_customer_name, validate_phone};
//!
//! validate_customer_name("Lucía Pérez").unwrap();
//! assert_eq!(validate_phone(Some(" 555-0101 ")).unwrap(), Some("555-0101".to_string()));
//! ```

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, Percent, BPS_PER_WHOLE};
use crate::types::{CustomerDetails, PromotionRule, PromotionWindow};
use crate::{MAX_CART_LINES, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates the customer name captured before a sale.
///
/// ## Rules
/// - Must not be empty
/// - At most 120 characters
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    required_text("customer name", name, 120)
}

/// Validates an optional phone number and returns it trimmed.
///
/// Blank input counts as "no phone".
///
/// ## Rules
/// - 7 to 20 characters
/// - Digits, spaces and `+ - ( )` only
///
/// ## Example
/// ```rust
/// use mostrador_core::validation::validate_phone;
///
/// assert_eq!(validate_phone(None).unwrap(), None);
/// assert_eq!(validate_phone(Some("   ")).unwrap(), None);
/// assert!(validate_phone(Some("+52 (55) 1234-5678")).is_ok());
/// assert!(validate_phone(Some("call me")).is_err());
/// ```
pub fn validate_phone(phone: Option<&str>) -> ValidationResult<Option<String>> {
    let phone = match phone.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(phone) => phone,
    };

    let len = phone.chars().count();
    if len < 7 {
        return Err(ValidationError::TooShort {
            field: "phone".to_string(),
            min: 7,
        });
    }
    if len > 20 {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: 20,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, and + - ( )".to_string(),
        });
    }

    Ok(Some(phone.to_string()))
}

/// Validates a promotion name (required, at most 100 characters).
pub fn validate_promotion_name(name: &str) -> ValidationResult<()> {
    required_text("promotion name", name, 100)
}

/// Validates a product name (required, at most 200 characters).
///
/// ```rust
/// use mostrador_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Mameluco Estrellas").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    required_text("product name", name, 200)
}

/// Validates a category name (required, at most 200 characters).
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    required_text("category name", name, 200)
}

/// Validates a search term. Blank is allowed and means "everything".
///
/// ## Returns
/// The trimmed term.
pub fn validate_search_term(term: &str) -> ValidationResult<String> {
    let term = term.trim();

    if term.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "search term".to_string(),
            max: 100,
        });
    }

    Ok(term.to_string())
}

// =============================================================================
// Promotion Validators
// =============================================================================

/// Validates the value carried by a promotion rule.
///
/// The pricing engine accepts any value; this is where the register
/// rejects nonsense before a promotion is stored.
///
/// ## Rules
/// - `PercentOff`: rate in (0%, 100%]
/// - `FixedAmountOff`: amount > 0
/// - `FreeItem`: threshold, when given, ≥ 1
pub fn validate_promotion_rule(rule: &PromotionRule) -> ValidationResult<()> {
    match rule {
        PromotionRule::PercentOff { rate } => {
            if rate.bps() <= 0 || rate.bps() > Percent::hundred().bps() {
                return Err(ValidationError::OutOfRange {
                    field: "discount percent".to_string(),
                    min: 1,
                    max: BPS_PER_WHOLE,
                });
            }
        }
        PromotionRule::FixedAmountOff { amount } => {
            if !amount.is_positive() {
                return Err(ValidationError::MustBePositive {
                    field: "discount amount".to_string(),
                });
            }
        }
        PromotionRule::FreeItem { threshold } => {
            if *threshold == Some(0) {
                return Err(ValidationError::MustBePositive {
                    field: "free item threshold".to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Validates that a promotion window does not end before it starts.
pub fn validate_promotion_window(window: &PromotionWindow) -> ValidationResult<()> {
    if let (Some(start), Some(end)) = (window.starts_on, window.ends_on) {
        if end < start {
            return Err(ValidationError::InvalidWindow {
                field: "promotion dates".to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Money Validators
// =============================================================================

/// Validates a cost or price. Zero is allowed.
///
/// ```rust
/// use mostrador_core::{validation::validate_price, Money};
///
/// assert!(validate_price("cost", Money::zero()).is_ok());
/// assert!(validate_price("cost", Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a selling price. Must be strictly positive.
pub fn validate_sale_price(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "sale price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Per-sale cart limits. The register may configure tighter ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLimits {
    pub max_lines: usize,
    pub max_item_quantity: u32,
}

impl Default for CartLimits {
    fn default() -> Self {
        CartLimits {
            max_lines: MAX_CART_LINES,
            max_item_quantity: MAX_ITEM_QUANTITY,
        }
    }
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `max`
pub fn validate_quantity(qty: u32, max: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(max),
        });
    }

    Ok(())
}

/// Validates that `current_lines` leaves room for one more line.
pub fn validate_cart_lines(current_lines: usize, max: usize) -> ValidationResult<()> {
    if current_lines >= max {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 0,
            max: max as i64,
        });
    }

    Ok(())
}

/// Checks that adding one unit of `variant_id` keeps the cart within limits.
///
/// ## Flow
/// ```text
/// variant already in cart? ── yes ──► quantity + 1 ≤ max_item_quantity?
///          │
///          no ──────────────────────► line_count < max_lines?
/// ```
pub fn check_can_add(cart: &Cart, variant_id: &str, limits: CartLimits) -> CoreResult<()> {
    match cart.line(variant_id) {
        Some(line) => {
            let requested = line.quantity.saturating_add(1);
            validate_quantity(requested, limits.max_item_quantity).map_err(|_| {
                CoreError::QuantityTooLarge {
                    requested,
                    max: limits.max_item_quantity,
                }
            })
        }
        None => validate_cart_lines(cart.line_count(), limits.max_lines).map_err(|_| {
            CoreError::CartTooLarge {
                max: limits.max_lines,
            }
        }),
    }
}

/// Checks everything that must hold before a sale is handed to the data
/// service.
///
/// ## Returns
/// The customer details with the phone trimmed (or dropped when blank).
pub fn validate_checkout(cart: &Cart, customer: &CustomerDetails) -> CoreResult<CustomerDetails> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    validate_customer_name(&customer.name)?;
    let phone = validate_phone(customer.phone.as_deref())?;

    Ok(CustomerDetails {
        name: customer.name.trim().to_string(),
        phone,
    })
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string.
///
/// ## Example
/// ```rust
/// use mostrador_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartEvent;
    use crate::types::{CatalogEntry, DEFAULT_CATEGORY_COLOR};
    use chrono::NaiveDate;

    fn entry(id: &str) -> CatalogEntry {
        CatalogEntry {
            variant_id: id.to_string(),
            product_id: "p".to_string(),
            product_name: "Gorro".to_string(),
            variant_name: "Bebé".to_string(),
            category: "Accesorios".to_string(),
            category_color: DEFAULT_CATEGORY_COLOR.to_string(),
            description: None,
            unit_price: Money::from_major(90),
            unit_cost: Money::from_major(40),
        }
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Lucía").is_ok());
        assert!(validate_customer_name("  ").is_err());
        assert!(validate_customer_name(&"ñ".repeat(120)).is_ok());
        assert!(validate_customer_name(&"ñ".repeat(121)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert_eq!(validate_phone(Some("5550101")).unwrap(), Some("5550101".to_string()));
        assert_eq!(validate_phone(Some("")).unwrap(), None);

        assert!(matches!(
            validate_phone(Some("555")),
            Err(ValidationError::TooShort { .. })
        ));
        assert!(matches!(
            validate_phone(Some(&"5".repeat(21))),
            Err(ValidationError::TooLong { .. })
        ));
        assert!(matches!(
            validate_phone(Some("555-01O1")),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_names() {
        assert!(validate_promotion_name("2x1 Verano").is_ok());
        assert!(validate_promotion_name("").is_err());
        assert!(validate_promotion_name(&"A".repeat(101)).is_err());
        assert!(validate_category_name("Pijamas").is_ok());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_search_term() {
        assert_eq!(validate_search_term("  dino ").unwrap(), "dino");
        assert_eq!(validate_search_term("").unwrap(), "");
        assert!(validate_search_term(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_promotion_rule() {
        let ok = [
            PromotionRule::PercentOff { rate: Percent::from_whole(15) },
            PromotionRule::PercentOff { rate: Percent::hundred() },
            PromotionRule::FixedAmountOff { amount: Money::from_cents(1) },
            PromotionRule::FreeItem { threshold: None },
            PromotionRule::FreeItem { threshold: Some(1) },
        ];
        for rule in &ok {
            assert!(validate_promotion_rule(rule).is_ok(), "{:?}", rule);
        }

        let bad = [
            PromotionRule::PercentOff { rate: Percent::default() },
            PromotionRule::PercentOff { rate: Percent::from_bps(10_001) },
            PromotionRule::PercentOff { rate: Percent::from_whole(-5) },
            PromotionRule::FixedAmountOff { amount: Money::zero() },
            PromotionRule::FixedAmountOff { amount: Money::from_cents(-100) },
            PromotionRule::FreeItem { threshold: Some(0) },
        ];
        for rule in &bad {
            assert!(validate_promotion_rule(rule).is_err(), "{:?}", rule);
        }
    }

    #[test]
    fn test_validate_promotion_window() {
        let day = |d| NaiveDate::from_ymd_opt(2026, 6, d).unwrap();

        let window = PromotionWindow { starts_on: Some(day(1)), ends_on: Some(day(30)) };
        assert!(validate_promotion_window(&window).is_ok());

        let same_day = PromotionWindow { starts_on: Some(day(5)), ends_on: Some(day(5)) };
        assert!(validate_promotion_window(&same_day).is_ok());

        let open = PromotionWindow { starts_on: None, ends_on: Some(day(5)) };
        assert!(validate_promotion_window(&open).is_ok());

        let backwards = PromotionWindow { starts_on: Some(day(10)), ends_on: Some(day(9)) };
        assert!(matches!(
            validate_promotion_window(&backwards),
            Err(ValidationError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_validate_prices() {
        assert!(validate_price("cost", Money::zero()).is_ok());
        assert!(validate_price("cost", Money::from_cents(-1)).is_err());
        assert!(validate_sale_price(Money::from_cents(1)).is_ok());
        assert!(validate_sale_price(Money::zero()).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1, MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(999, MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(0, MAX_ITEM_QUANTITY).is_err());
        assert!(validate_quantity(1000, MAX_ITEM_QUANTITY).is_err());
    }

    #[test]
    fn test_check_can_add_line_limit() {
        let limits = CartLimits { max_lines: 2, max_item_quantity: 10 };
        let cart = Cart::new()
            .apply(CartEvent::AddItem(entry("a")))
            .apply(CartEvent::AddItem(entry("b")));

        assert!(check_can_add(&cart, "a", limits).is_ok());
        assert!(matches!(
            check_can_add(&cart, "c", limits),
            Err(CoreError::CartTooLarge { max: 2 })
        ));
    }

    #[test]
    fn test_check_can_add_quantity_limit() {
        let limits = CartLimits { max_lines: 10, max_item_quantity: 2 };
        let cart = Cart::new()
            .apply(CartEvent::AddItem(entry("a")))
            .apply(CartEvent::AddItem(entry("a")));

        assert!(matches!(
            check_can_add(&cart, "a", limits),
            Err(CoreError::QuantityTooLarge { requested: 3, max: 2 })
        ));
    }

    #[test]
    fn test_validate_checkout() {
        let customer = CustomerDetails {
            name: "  Ana  ".to_string(),
            phone: Some(" ".to_string()),
        };

        assert!(matches!(
            validate_checkout(&Cart::new(), &customer),
            Err(CoreError::EmptyCart)
        ));

        let cart = Cart::new().apply(CartEvent::AddItem(entry("a")));
        let cleaned = validate_checkout(&cart, &customer).unwrap();
        assert_eq!(cleaned.name, "Ana");
        assert_eq!(cleaned.phone, None);

        let nameless = CustomerDetails::default();
        assert!(matches!(
            validate_checkout(&cart, &nameless),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("123").is_err());
    }
}
