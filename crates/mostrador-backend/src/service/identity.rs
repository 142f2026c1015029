//! # Identity Service
//!
//! ## Auth Events
//! ```text
//! sign_in ──► AuthEvent::SignedIn(session) ──┐
//!                                            ├──► broadcast::Receiver<AuthEvent>
//! sign_out ─► AuthEvent::SignedOut ──────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::BackendResult;

/// A register user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

/// A signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    #[serde(skip_serializing, default)]
    pub access_token: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Published on every sign-in and sign-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
}

/// Sign-in, sign-out and session change notifications.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Returns `BackendError::InvalidCredentials` on a bad email/password.
    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session>;

    /// Returns `BackendError::NotSignedIn` when there is no session.
    async fn sign_out(&self) -> BackendResult<()>;

    async fn current_user(&self) -> BackendResult<Option<User>>;

    /// Receiver for every auth change from now on.
    fn subscribe_to_auth_changes(&self) -> broadcast::Receiver<AuthEvent>;
}
