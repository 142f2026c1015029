//! Users and the current session behind [`IdentityService`].

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{InMemoryBackend, Operation};
use crate::error::{BackendError, BackendResult};
use crate::service::{AuthEvent, IdentityService, Session, User};

impl InMemoryBackend {
    /// Publishes an auth event. Having no subscribers is not an error.
    fn publish(&self, event: AuthEvent) {
        if self.auth_tx.send(event).is_err() {
            debug!("No auth subscribers");
        }
    }
}

#[async_trait]
impl IdentityService for InMemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session> {
        self.check_fault(Operation::SignIn).await?;

        let email = email.trim().to_lowercase();
        let mut identity = self.identity.write().await;

        let user = identity
            .users
            .iter()
            .find(|row| row.user.email.to_lowercase() == email && row.password == password)
            .map(|row| row.user.clone());

        let Some(user) = user else {
            warn!(email = %email, "Sign-in rejected");
            return Err(BackendError::InvalidCredentials);
        };

        let session = Session {
            user,
            access_token: Uuid::new_v4().to_string(),
            signed_in_at: Utc::now(),
        };
        identity.session = Some(session.clone());
        drop(identity);

        info!(user_id = %session.user.id, "Signed in");
        self.publish(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        self.check_fault(Operation::SignOut).await?;

        let session = self
            .identity
            .write()
            .await
            .session
            .take()
            .ok_or(BackendError::NotSignedIn)?;

        info!(user_id = %session.user.id, "Signed out");
        self.publish(AuthEvent::SignedOut);
        Ok(())
    }

    async fn current_user(&self) -> BackendResult<Option<User>> {
        self.check_fault(Operation::CurrentUser).await?;

        Ok(self
            .identity
            .read()
            .await
            .session
            .as_ref()
            .map(|s| s.user.clone()))
    }

    fn subscribe_to_auth_changes(&self) -> broadcast::Receiver<AuthEvent> {
        self.auth_tx.subscribe()
    }
}
