//! # Session State
//!
//! The signed-in session. The auth commands are its only writer: each
//! applies the event matching the identity service call it just made.
//!
//! ```text
//! sign_in  ──► apply(SignedIn) ──┐
//!                                ├──► RwLock<Option<Session>>
//! sign_out ──► apply(SignedOut) ─┘            │
//!                           require() ◄───────┘
//! ```

use std::sync::Arc;

use mostrador_backend::{AuthEvent, Session};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::ApiError;

/// Shared handle to the current session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<RwLock<Option<Session>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn current(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    async fn set(&self, session: Session) {
        *self.session.write().await = Some(session);
    }

    async fn clear(&self) {
        *self.session.write().await = None;
    }

    /// The current session, or `UNAUTHORIZED`.
    pub async fn require(&self) -> Result<Session, ApiError> {
        self.current().await.ok_or_else(ApiError::unauthorized)
    }

    /// Applies one auth event.
    pub async fn apply(&self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(session) => {
                debug!(user_id = %session.user.id, "Session started");
                self.set(session).await;
            }
            AuthEvent::SignedOut => {
                debug!("Session ended");
                self.clear().await;
            }
        }
    }
}
