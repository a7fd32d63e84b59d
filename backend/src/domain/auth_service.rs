//! Login, signup, and logout over a [`SessionStore`].
//!
//! The service holds the shared, thread-safe collaborators (credential
//! verifier and id generator); the per-client store is passed to each call.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::ports::{CredentialVerifier, INVALID_CREDENTIALS, SessionSlot, UserIdGenerator};
use crate::domain::{
    Error, ErrorCode, LoginCredentials, Registration, Role, RoleSet, SessionStore, User,
    UserProfile, UserStanding,
};

/// Message returned when a verified login cannot be persisted.
pub const LOGIN_FAILED: &str = "Login failed";
/// Message returned when a new account cannot be persisted.
pub const SIGNUP_FAILED: &str = "Signup failed";

/// Authentication use cases.
#[derive(Clone)]
pub struct AuthService {
    verifier: Arc<dyn CredentialVerifier>,
    ids: Arc<dyn UserIdGenerator>,
}

impl AuthService {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, ids: Arc<dyn UserIdGenerator>) -> Self {
        Self { verifier, ids }
    }

    /// Check `credentials` and commit the matching user.
    ///
    /// Fails with `Invalid credentials` (unauthorized) on a mismatch and with
    /// `Login failed` (service unavailable) when the verifier or the slot
    /// breaks. The session is untouched on every failure path.
    pub async fn login<S: SessionSlot>(
        &self,
        store: &mut SessionStore<S>,
        credentials: &LoginCredentials,
    ) -> Result<User, Error> {
        let user = match self.verifier.verify(credentials).await {
            Ok(user) => user,
            Err(err) if err.code() == ErrorCode::Unauthorized => {
                info!("login rejected");
                return Err(Error::unauthorized(INVALID_CREDENTIALS));
            }
            Err(err) => {
                error!(error = %err, "credential verifier failed");
                return Err(Error::service_unavailable(LOGIN_FAILED));
            }
        };

        store.commit(user.clone()).map_err(|err| {
            error!(error = %err, user_id = %user.id(), "failed to persist login");
            Error::service_unavailable(LOGIN_FAILED)
        })?;
        info!(user_id = %user.id(), "user logged in");
        Ok(user)
    }

    /// Create an account from `registration` and log it in.
    ///
    /// The new user holds only the selected role and starts unverified with a
    /// zero rating and zero counters. The password is dropped with
    /// `registration`.
    pub fn signup<S: SessionSlot>(
        &self,
        store: &mut SessionStore<S>,
        registration: Registration,
    ) -> Result<User, Error> {
        let role: Role = registration.role().into();
        let user = User::new(
            self.ids.next_id(),
            UserProfile {
                email: registration.email().to_owned(),
                first_name: registration.first_name().to_owned(),
                last_name: registration.last_name().to_owned(),
                phone: registration.phone().map(str::to_owned),
                profile_picture: None,
            },
            RoleSet::single(role),
            UserStanding::NEWCOMER,
        );

        store.commit(user.clone()).map_err(|err| {
            error!(error = %err, user_id = %user.id(), "failed to persist signup");
            Error::service_unavailable(SIGNUP_FAILED)
        })?;
        info!(user_id = %user.id(), %role, "user signed up");
        Ok(user)
    }

    /// Log out unconditionally.
    pub fn logout<S: SessionSlot>(&self, store: &mut SessionStore<S>) {
        let user_id = store.user().map(|user| user.id().to_string());
        store.clear();
        info!(user_id = user_id.as_deref().unwrap_or("anonymous"), "user logged out");
    }
}
