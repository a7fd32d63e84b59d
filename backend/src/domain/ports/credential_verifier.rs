//! Driving port for credential checks.
//!
//! Inbound adapters never look at a roster themselves: they hand
//! [`LoginCredentials`] to a [`CredentialVerifier`] and get back the matching
//! [`User`]. A real identity backend slots in behind the same trait; the
//! fixture implementation below scans an in-memory roster.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Password accepted for every fixture account.
pub const FIXTURE_PASSWORD: &str = "password";

/// Message returned for unknown emails and wrong passwords alike.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

const FIXTURE_ROSTER_JSON: &str = include_str!("../../../fixtures/roster.json");

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Return the user identified by `credentials`.
    ///
    /// Unknown emails and wrong passwords both fail with
    /// [`crate::domain::ErrorCode::Unauthorized`]; any other code signals a
    /// backend failure.
    async fn verify(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// Decode the built-in demo roster.
pub fn fixture_roster() -> Result<Vec<User>, serde_json::Error> {
    serde_json::from_str(FIXTURE_ROSTER_JSON)
}

/// In-memory verifier over a fixed roster.
///
/// The roster is scanned in order and the first record whose email equals the
/// input exactly is selected. Every account shares [`FIXTURE_PASSWORD`].
#[derive(Debug, Clone)]
pub struct FixtureCredentialVerifier {
    roster: Arc<[User]>,
}

impl FixtureCredentialVerifier {
    /// Verify against the supplied roster.
    pub fn new(roster: Vec<User>) -> Self {
        Self {
            roster: roster.into(),
        }
    }

    /// Verify against the built-in demo roster.
    pub fn from_fixture_roster() -> Result<Self, serde_json::Error> {
        fixture_roster().map(Self::new)
    }

    /// Records consulted by this verifier, in scan order.
    pub fn roster(&self) -> &[User] {
        &self.roster
    }

    fn find_by_email(&self, email: &str) -> Option<&User> {
        self.roster.iter().find(|user| user.email() == email)
    }
}

#[async_trait]
impl CredentialVerifier for FixtureCredentialVerifier {
    async fn verify(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        match self.find_by_email(credentials.email()) {
            Some(user) if credentials.password() == FIXTURE_PASSWORD => Ok(user.clone()),
            _ => Err(Error::unauthorized(INVALID_CREDENTIALS)),
        }
    }
}
