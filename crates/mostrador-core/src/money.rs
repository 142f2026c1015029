//! # Money Module
//!
//! Provides the `Money` and `Percent` types for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Add a $0.10 item three times, remove it twice:                         │
//! │    the cart "total" drifts a little further on every cycle              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 + 10 + 10 - 10 - 10 = 10 cents, every single time                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mostrador_core::money::{Money, Percent};
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2u32;                 // $21.98
//! let total = price + Money::from_cents(500); // $15.99
//!
//! // Percentages are basis points
//! let off = Money::from_cents(10000).percent_of(Percent::from_whole(15));
//! assert_eq!(off.cents(), 1500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

/// Basis points in 100%.
pub const BPS_PER_WHOLE: i64 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: A promotion may carry a non-positive value, and the
///   engine must accept it without panicking
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  CatalogEntry.unit_price ──► LineItem.unit_price ──► line total         │
/// │                                                                         │
/// │  Σ line totals ──► subtotal ──► discount (promotion) ──► total          │
/// │                                                                         │
/// │  Only ConfigState::format_money turns it into "$10.99"                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use mostrador_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use mostrador_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // $10.99
    /// assert_eq!(price.cents(), 1099);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -$5.50
    /// assert_eq!(negative.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion, truncated toward zero.
    ///
    /// ## Example
    /// ```rust
    /// use mostrador_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).major(), 10);
    /// assert_eq!(Money::from_cents(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use mostrador_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Returns `rate` of this amount, rounded half away from zero to the cent.
    ///
    /// ## Implementation
    /// Integer math in i128: `amount_cents * bps / 10000`, so a subtotal
    /// of any realistic size cannot overflow mid-calculation.
    ///
    /// ## Example
    /// ```rust
    /// use mostrador_core::money::{Money, Percent};
    ///
    /// let subtotal = Money::from_cents(999);     // $9.99
    /// let rate = Percent::from_whole(15);        // 15%
    /// // $9.99 × 15% = $1.4985 → $1.50
    /// assert_eq!(subtotal.percent_of(rate).cents(), 150);
    /// ```
    pub fn percent_of(&self, rate: Percent) -> Money {
        let scaled = self.0 as i128 * rate.bps() as i128;
        Money::from_cents(div_round_half_away(scaled, BPS_PER_WHOLE as i128) as i64)
    }
}

/// Integer division rounding half away from zero. `divisor` must be positive.
pub(crate) fn div_round_half_away(dividend: i128, divisor: i128) -> i128 {
    let quotient = dividend / divisor;
    let remainder = dividend % divisor;
    if remainder.abs() * 2 >= divisor {
        quotient + dividend.signum()
    } else {
        quotient
    }
}

// =============================================================================
// Percent Type
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1500 bps = 15%, 1250 bps = 12.5%
///
/// Signed, because a promotion value is stored as entered and the engine
/// accepts non-positive values unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(i64);

impl Percent {
    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: i64) -> Self {
        Percent(bps)
    }

    /// Creates a percentage from a whole number of percent (15 → 15%).
    #[inline]
    pub const fn from_whole(percent: i64) -> Self {
        Percent(percent * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> i64 {
        self.0
    }

    /// 100%.
    #[inline]
    pub const fn hundred() -> Self {
        Percent(BPS_PER_WHOLE)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Displays as `15%` or `12.5%`.
impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = (self.0 / 100).abs();
        let frac = (self.0 % 100).abs();
        if frac == 0 {
            write!(f, "{}{}%", sign, whole)
        } else if frac % 10 == 0 {
            write!(f, "{}{}.{}%", sign, whole, frac / 10)
        } else {
            write!(f, "{}{}.{:02}%", sign, whole, frac)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and labels. Use `ConfigState::format_money` in the
/// register for the configured currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by a quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
        assert_eq!(Money::from_major(30).cents(), 3000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3u32).cents(), 3000);
        assert_eq!((-a).cents(), -1000);
        assert_eq!(a.min(b), b);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 5].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 355);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_percent_of_basic() {
        let subtotal = Money::from_cents(10000);
        assert_eq!(subtotal.percent_of(Percent::from_whole(15)).cents(), 1500);
        assert_eq!(subtotal.percent_of(Percent::from_bps(1250)).cents(), 1250);
        assert_eq!(subtotal.percent_of(Percent::default()).cents(), 0);
    }

    #[test]
    fn test_percent_of_rounds_half_away_from_zero() {
        // $0.10 × 25% = 2.5 cents → 3
        assert_eq!(Money::from_cents(10).percent_of(Percent::from_whole(25)).cents(), 3);
        // -$0.10 × 25% = -2.5 cents → -3
        assert_eq!(Money::from_cents(-10).percent_of(Percent::from_whole(25)).cents(), -3);
        // $0.10 × 24% = 2.4 cents → 2
        assert_eq!(Money::from_cents(10).percent_of(Percent::from_whole(24)).cents(), 2);
    }

    #[test]
    fn test_percent_display() {
        assert_eq!(Percent::from_whole(15).to_string(), "15%");
        assert_eq!(Percent::from_bps(1250).to_string(), "12.5%");
        assert_eq!(Percent::from_bps(1234).to_string(), "12.34%");
        assert_eq!(Percent::from_bps(-500).to_string(), "-5%");
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }

    /// Repeated add/remove cycles never drift.
    #[test]
    fn test_add_remove_cycles_are_exact() {
        let dime = Money::from_cents(10);
        let mut running = Money::zero();
        for _ in 0..1000 {
            running += dime;
            running += dime;
            running -= dime;
        }
        assert_eq!(running.cents(), 10_000);
    }
}
