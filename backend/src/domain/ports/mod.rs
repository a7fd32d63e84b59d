//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_verifier;
mod dashboard_query;
mod session_slot;
mod user_id_generator;

#[cfg(test)]
pub use credential_verifier::MockCredentialVerifier;
pub use credential_verifier::{
    CredentialVerifier, FIXTURE_PASSWORD, FixtureCredentialVerifier, INVALID_CREDENTIALS,
    fixture_roster,
};
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::{DashboardQuery, FixtureDashboardQuery};
#[cfg(test)]
pub use session_slot::MockSessionSlot;
pub use session_slot::{MemorySessionSlot, SESSION_SLOT_KEY, SessionSlot, SessionSlotError};
#[cfg(test)]
pub use user_id_generator::MockUserIdGenerator;
pub use user_id_generator::{TimestampUserIdGenerator, UserIdGenerator};
