//! # Auth Commands
//!
//! Sign in and out at the register. These commands are the only writers
//! of [`SessionState`].

use mostrador_backend::{AuthEvent, BackendError, Session, User};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{Services, SessionState};

pub async fn sign_in(
    services: &Services,
    session: &SessionState,
    email: &str,
    password: &str,
) -> Result<Session, ApiError> {
    debug!(email = %email, "sign_in command");

    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let signed_in = services.identity.sign_in(email.trim(), password).await?;
    session.apply(AuthEvent::SignedIn(signed_in.clone())).await;

    info!(user_id = %signed_in.user.id, "Cashier signed in");
    Ok(signed_in)
}

pub async fn sign_out(services: &Services, session: &SessionState) -> Result<(), ApiError> {
    debug!("sign_out command");

    let result = services.identity.sign_out().await;
    if matches!(result, Ok(()) | Err(BackendError::NotSignedIn)) {
        session.apply(AuthEvent::SignedOut).await;
    }
    Ok(result?)
}

/// The user the data service considers signed in.
pub async fn current_user(services: &Services) -> Result<Option<User>, ApiError> {
    debug!("current_user command");
    Ok(services.identity.current_user().await?)
}
