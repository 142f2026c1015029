//! # Error Types
//!
//! Domain-specific error types for mostrador-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mostrador-core errors (this file)                                     │
//! │  ├── CoreError        - Cart limits and sale preconditions             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  mostrador-backend errors (separate crate)                             │
//! │  └── BackendError     - Data service failures                          │
//! │                                                                         │
//! │  register errors (in app)                                              │
//! │  └── ApiError         - What the shell sees (serialized)               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError ← BackendError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine itself never returns an error: every function in
//! [`crate::pricing`] and [`crate::cart`] is total.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business rule violations.
///
/// These are raised by the register before it dispatches a cart event or
/// hands a sale to the data service.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Cart has reached the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Item quantity would exceed the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// Finalizing a sale with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Variant is not in the loaded catalog.
    #[error("Variant not found: {0}")]
    VariantNotFound(String),

    /// Promotion is not among the active promotions.
    #[error("Promotion not available: {0}")]
    PromotionNotAvailable(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before anything reaches the data service.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid phone).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A date window that ends before it starts.
    #[error("{field} ends before it starts")]
    InvalidWindow { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
