//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::TranslationCatalogue;
use crate::domain::ports::{
    FixtureCredentialVerifier, FixtureDashboardQuery, TimestampUserIdGenerator,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state wired to the fixture roster, dashboards, and tables.
pub fn fixture_state() -> HttpState {
    HttpState::new(
        HttpStatePorts {
            verifier: Arc::new(
                FixtureCredentialVerifier::from_fixture_roster().expect("fixture roster"),
            ),
            user_ids: Arc::new(TimestampUserIdGenerator::new(Arc::new(
                mockable::DefaultClock,
            ))),
            dashboards: Arc::new(FixtureDashboardQuery::from_fixtures().expect("fixtures")),
        },
        Arc::new(TranslationCatalogue::embedded().expect("embedded tables")),
    )
}
