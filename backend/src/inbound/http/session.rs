//! Cookie-backed session plumbing for HTTP handlers.
//!
//! Each client's persisted slot is its encrypted session cookie. The
//! [`SessionContext`] extractor wraps the request's Actix session in a
//! [`CookieSessionSlot`], builds a [`SessionStore`] over it, and restores it
//! before the handler runs, so handlers only see domain operations.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::{SESSION_SLOT_KEY, SessionSlot, SessionSlotError};
use crate::domain::{Error, LOGIN_REQUIRED, SessionStore, User};

/// Largest JSON-encoded record the cookie accepts.
///
/// The session middleware only serialises the cookie after the handler has
/// answered, so an oversized record has to be refused here. Once encrypted
/// and base64-encoded, 2800 bytes stay below the 4 KB browser cookie limit.
pub const COOKIE_RECORD_BUDGET: usize = 2800;

/// [`SessionSlot`] stored under the `user` key of the session cookie.
#[derive(Clone)]
pub struct CookieSessionSlot(Session);

impl CookieSessionSlot {
    pub fn new(session: Session) -> Self {
        Self(session)
    }
}

impl SessionSlot for CookieSessionSlot {
    fn load(&self) -> Result<Option<String>, SessionSlotError> {
        self.0
            .get::<String>(SESSION_SLOT_KEY)
            .map_err(|err| SessionSlotError::read(err.to_string()))
    }

    fn store(&self, record: &str) -> Result<(), SessionSlotError> {
        let encoded = serde_json::to_string(record)
            .map_err(|err| SessionSlotError::write(err.to_string()))?;
        if encoded.len() > COOKIE_RECORD_BUDGET {
            return Err(SessionSlotError::write(format!(
                "record of {} bytes exceeds the {COOKIE_RECORD_BUDGET} byte cookie budget",
                encoded.len()
            )));
        }
        self.0
            .insert(SESSION_SLOT_KEY, record)
            .map_err(|err| SessionSlotError::write(err.to_string()))
    }

    fn remove(&self) -> Result<(), SessionSlotError> {
        self.0.remove(SESSION_SLOT_KEY);
        Ok(())
    }
}

/// Restored session store for the current request.
pub struct SessionContext(SessionStore<CookieSessionSlot>);

impl SessionContext {
    /// Wrap and restore the underlying Actix session.
    pub fn new(session: Session) -> Self {
        let mut store = SessionStore::new(CookieSessionSlot::new(session));
        store.restore();
        Self(store)
    }

    /// Store to pass to [`crate::domain::AuthService`] calls.
    pub fn store_mut(&mut self) -> &mut SessionStore<CookieSessionSlot> {
        &mut self.0
    }

    pub fn store(&self) -> &SessionStore<CookieSessionSlot> {
        &self.0
    }

    /// Logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.0.user()
    }

    /// Require a logged-in user or return `401 Unauthorized`.
    pub fn require_user(&self) -> Result<&User, Error> {
        self.user()
            .ok_or_else(|| Error::unauthorized(LOGIN_REQUIRED))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
