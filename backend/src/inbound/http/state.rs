//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CredentialVerifier, DashboardQuery, UserIdGenerator};
use crate::domain::{AuthService, TranslationCatalogue};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub verifier: Arc<dyn CredentialVerifier>,
    pub user_ids: Arc<dyn UserIdGenerator>,
    pub dashboards: Arc<dyn DashboardQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: AuthService,
    pub dashboards: Arc<dyn DashboardQuery>,
    pub translations: Arc<TranslationCatalogue>,
}

impl HttpState {
    /// Wire the authentication service from `ports` and attach the
    /// translation tables.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use colipass::domain::TranslationCatalogue;
    /// use colipass::domain::ports::{
    ///     FixtureCredentialVerifier, FixtureDashboardQuery, TimestampUserIdGenerator,
    /// };
    /// use colipass::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let ports = HttpStatePorts {
    ///     verifier: Arc::new(FixtureCredentialVerifier::from_fixture_roster().unwrap()),
    ///     user_ids: Arc::new(TimestampUserIdGenerator::new(Arc::new(mockable::DefaultClock))),
    ///     dashboards: Arc::new(FixtureDashboardQuery::from_fixtures().unwrap()),
    /// };
    /// let state = HttpState::new(ports, Arc::new(TranslationCatalogue::embedded().unwrap()));
    /// let _auth = state.auth.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, translations: Arc<TranslationCatalogue>) -> Self {
        let HttpStatePorts {
            verifier,
            user_ids,
            dashboards,
        } = ports;
        Self {
            auth: AuthService::new(verifier, user_ids),
            dashboards,
            translations,
        }
    }
}
