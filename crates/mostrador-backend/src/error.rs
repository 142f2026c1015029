//! # Backend Error Types
//!
//! Error types for data service operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Data service failure (network, constraint, auth)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BackendError (this module) ← Adds context and categorization          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in register) ← Serialized for the shell                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cashier sees a message; the cart is left as it was                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Data service errors.
///
/// `Clone` so a test can queue one with
/// [`InMemoryBackend::fail_next`](crate::InMemoryBackend::fail_next).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Entity not found.
    ///
    /// ## When This Occurs
    /// - Unknown variant, promotion, customer or sale id
    /// - Category referenced by a new product doesn't exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Email/password pair rejected.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Operation needs a signed-in user.
    #[error("Not signed in")]
    NotSignedIn,

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Two customers with the same phone
    /// - Two categories with the same name
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Any other constraint the data service enforces.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The service could not be reached or timed out.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Internal data service error.
    #[error("Internal backend error: {0}")]
    Internal(String),
}

impl BackendError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        BackendError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        BackendError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True when the same call may succeed if tried again later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BackendError::Unavailable(_))
    }
}

/// Result type for data service operations.
pub type BackendResult<T> = Result<T, BackendError>;
