//! Builders wiring concrete port implementations into [`HttpState`].

use std::path::Path;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use colipass::domain::TranslationCatalogue;
use colipass::domain::ports::{
    CredentialVerifier, FixtureCredentialVerifier, FixtureDashboardQuery,
    TimestampUserIdGenerator,
};
use colipass::inbound::http::state::{HttpState, HttpStatePorts};
use colipass::outbound::load_roster;

use super::ServerConfig;

/// Credential verifier over the configured roster, or the embedded one.
fn build_verifier(roster_path: Option<&Path>) -> std::io::Result<Arc<dyn CredentialVerifier>> {
    let verifier = match roster_path {
        Some(path) => {
            let roster = load_roster(path).map_err(std::io::Error::other)?;
            info!(path = %path.display(), accounts = roster.len(), "loaded roster");
            FixtureCredentialVerifier::new(roster)
        }
        None => FixtureCredentialVerifier::from_fixture_roster().map_err(|error| {
            std::io::Error::other(format!("embedded roster is malformed: {error}"))
        })?,
    };
    Ok(Arc::new(verifier))
}

/// Build shared handler state from configuration.
///
/// # Errors
/// Returns [`std::io::Error`] when the roster, dashboard fixtures or
/// translation tables cannot be decoded.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let verifier = build_verifier(config.roster_path.as_deref())?;
    let dashboards = FixtureDashboardQuery::from_fixtures().map_err(|error| {
        std::io::Error::other(format!("embedded dashboards are malformed: {error}"))
    })?;
    let translations = TranslationCatalogue::embedded().map_err(|error| {
        std::io::Error::other(format!("embedded translation tables are malformed: {error}"))
    })?;

    Ok(web::Data::new(HttpState::new(
        HttpStatePorts {
            verifier,
            user_ids: Arc::new(TimestampUserIdGenerator::new(Arc::new(DefaultClock))),
            dashboards: Arc::new(dashboards),
        },
        Arc::new(translations),
    )))
}
