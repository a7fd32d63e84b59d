//! Client session state backed by a persisted slot.
//!
//! A [`SessionStore`] owns one [`Session`] and the [`SessionSlot`] it is
//! mirrored to. The lifecycle is fixed: construct (loading), [`restore`] once,
//! then any number of [`commit`] and [`clear`] calls.
//!
//! [`restore`]: SessionStore::restore
//! [`commit`]: SessionStore::commit
//! [`clear`]: SessionStore::clear

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::ports::{SessionSlot, SessionSlotError};
use crate::domain::{User, UserDto};

/// Authentication state visible to the client.
///
/// `is_authenticated` is not stored: it is true exactly when a user is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "SessionDto")]
pub struct Session {
    user: Option<User>,
    loading: bool,
}

impl Session {
    const LOADING: Self = Self {
        user: None,
        loading: true,
    };

    /// Current user, if logged in.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True until the initial restore has run.
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Wire shape of [`Session`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub user: Option<UserDto>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl From<Session> for SessionDto {
    fn from(value: Session) -> Self {
        let is_authenticated = value.is_authenticated();
        Self {
            user: value.user.map(UserDto::from),
            is_authenticated,
            loading: value.loading,
        }
    }
}

/// Errors raised when committing a user to the slot.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("failed to encode session record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Slot(#[from] SessionSlotError),
}

/// Session mirrored into a persisted slot.
///
/// # Examples
/// ```
/// use colipass::domain::SessionStore;
/// use colipass::domain::ports::MemorySessionSlot;
///
/// let mut store = SessionStore::new(MemorySessionSlot::default());
/// assert!(store.is_loading());
/// store.restore();
/// assert!(!store.is_loading());
/// assert!(!store.is_authenticated());
/// ```
#[derive(Debug)]
pub struct SessionStore<S> {
    slot: S,
    session: Session,
}

impl<S: SessionSlot> SessionStore<S> {
    /// Wrap `slot` in a store that has not been restored yet.
    pub fn new(slot: S) -> Self {
        Self {
            slot,
            session: Session::LOADING,
        }
    }

    /// Load the persisted user, if any, and finish loading.
    ///
    /// Missing, unreadable, and corrupt records all leave the session logged
    /// out; failures are logged, never returned. Only the first call reads
    /// the slot.
    pub fn restore(&mut self) -> &Session {
        if self.session.loading {
            self.session = Session {
                user: self.read_slot(),
                loading: false,
            };
        }
        &self.session
    }

    fn read_slot(&self) -> Option<User> {
        let record = match self.slot.load() {
            Ok(record) => record?,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable session slot");
                return None;
            }
        };
        match serde_json::from_str(&record) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(error = %err, "ignoring corrupt session record");
                None
            }
        }
    }

    /// Persist `user` and mark the session authenticated.
    ///
    /// When the slot write fails the session keeps its previous state.
    pub fn commit(&mut self, user: User) -> Result<(), SessionStoreError> {
        let record = serde_json::to_string(&user)?;
        self.slot.store(&record)?;
        self.session.user = Some(user);
        Ok(())
    }

    /// Drop the persisted record and log the session out.
    pub fn clear(&mut self) {
        if let Err(err) = self.slot.remove() {
            error!(error = %err, "failed to remove session record");
        }
        self.session.user = None;
    }

    /// Snapshot of the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    /// Tear the store down, handing back its slot.
    pub fn close(self) -> S {
        self.slot
    }
}

#[cfg(test)]
mod tests;
