//! # API Error Type
//!
//! Unified error type for register commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Mostrador                              │
//! │                                                                         │
//! │  Shell                       Register                                   │
//! │  ─────                       ────────                                   │
//! │                                                                         │
//! │  finalize_sale                                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Backend Error? ─── BackendError::Unavailable("...") ──┐        │  │
//! │  │         │                                              │        │  │
//! │  │         ▼                                              ▼        │  │
//! │  │  Rule Violation? ─── CoreError::EmptyCart ─────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "SERVICE_UNAVAILABLE", "message": "..." }                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use mostrador_backend::BackendError;
use mostrador_core::{CoreError, ValidationError};
use serde::Serialize;

use crate::state::ConfigError;

/// API error returned from register commands.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Sale not found: 3f2a..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart operation failed
    CartError,

    /// Business rule violated (unknown promotion, empty sale)
    BusinessLogic,

    /// No signed-in user
    Unauthorized,

    /// Sign-in rejected
    InvalidCredentials,

    /// Unique constraint hit
    Conflict,

    /// Data service unreachable; the same call may work later
    ServiceUnavailable,

    /// Data service rejected or failed the operation
    BackendError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    pub fn unauthorized() -> Self {
        ApiError::new(ErrorCode::Unauthorized, "Sign in to continue")
    }
}

/// Converts data service errors to API errors.
impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            BackendError::InvalidCredentials => ApiError::new(
                ErrorCode::InvalidCredentials,
                "Invalid email or password",
            ),
            BackendError::NotSignedIn => ApiError::unauthorized(),
            BackendError::Duplicate { field, value } => ApiError::new(
                ErrorCode::Conflict,
                format!("{} '{}' already exists", field, value),
            ),
            BackendError::ConstraintViolation(message) => {
                tracing::error!("Constraint violation: {}", message);
                ApiError::new(ErrorCode::BackendError, "The data service rejected the change")
            }
            BackendError::Unavailable(e) => {
                tracing::warn!("Data service unavailable: {}", e);
                ApiError::new(
                    ErrorCode::ServiceUnavailable,
                    "Data service unavailable, try again",
                )
            }
            BackendError::Internal(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Internal backend error: {}", e);
                ApiError::new(ErrorCode::BackendError, "Data service operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CartTooLarge { max } => ApiError::new(
                ErrorCode::CartError,
                format!("Cart cannot have more than {} lines", max),
            ),
            CoreError::QuantityTooLarge { requested, max } => ApiError::new(
                ErrorCode::CartError,
                format!("Quantity {} exceeds maximum allowed ({})", requested, max),
            ),
            CoreError::EmptyCart => ApiError::new(ErrorCode::CartError, "Cart is empty"),
            CoreError::VariantNotFound(id) => ApiError::not_found("Variant", &id),
            CoreError::PromotionNotAvailable(id) => ApiError::new(
                ErrorCode::BusinessLogic,
                format!("Promotion not available: {}", id),
            ),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        tracing::error!("Configuration error: {}", err);
        ApiError::internal("Register configuration is invalid")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
