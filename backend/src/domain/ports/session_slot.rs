//! Driven port for the persisted session slot.
//!
//! A slot is a single key-value cell holding the serialised current user, or
//! nothing when the client is logged out. Browsers back it with local
//! storage; here it is a cookie, a file, or memory. Each call is one atomic
//! replacement, so implementations need no locking discipline beyond what
//! their medium already provides.

use std::sync::{Arc, Mutex};

use super::define_port_error;

/// Key under which the serialised user is stored.
pub const SESSION_SLOT_KEY: &str = "user";

define_port_error! {
    /// Errors raised by session slot adapters.
    pub enum SessionSlotError {
        /// The slot could not be read.
        Read => "session slot read failed",
        /// The slot could not be written.
        Write => "session slot write failed",
        /// The slot could not be removed.
        Remove => "session slot removal failed",
    }
}

/// Single-value persisted slot.
#[cfg_attr(test, mockall::automock)]
pub trait SessionSlot {
    /// Read the stored record, or `None` when the slot is empty.
    fn load(&self) -> Result<Option<String>, SessionSlotError>;

    /// Replace the stored record.
    fn store(&self, record: &str) -> Result<(), SessionSlotError>;

    /// Empty the slot. Removing an empty slot succeeds.
    fn remove(&self) -> Result<(), SessionSlotError>;
}

/// In-memory slot shared between clones.
///
/// Clones observe the same cell, so a test can hand one clone to a
/// [`crate::domain::SessionStore`] and inspect the other.
///
/// # Examples
/// ```
/// use colipass::domain::ports::{MemorySessionSlot, SessionSlot};
///
/// let slot = MemorySessionSlot::default();
/// slot.store("{}").unwrap();
/// assert_eq!(slot.contents().as_deref(), Some("{}"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySessionSlot {
    cell: Arc<Mutex<Option<String>>>,
}

impl MemorySessionSlot {
    /// A slot pre-populated with `record`.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            cell: Arc::new(Mutex::new(Some(record.into()))),
        }
    }

    /// Snapshot of the stored record.
    pub fn contents(&self) -> Option<String> {
        self.cell
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl SessionSlot for MemorySessionSlot {
    fn load(&self) -> Result<Option<String>, SessionSlotError> {
        self.cell
            .lock()
            .map(|guard| guard.clone())
            .map_err(|err| SessionSlotError::read(err.to_string()))
    }

    fn store(&self, record: &str) -> Result<(), SessionSlotError> {
        let mut guard = self
            .cell
            .lock()
            .map_err(|err| SessionSlotError::write(err.to_string()))?;
        *guard = Some(record.to_owned());
        Ok(())
    }

    fn remove(&self) -> Result<(), SessionSlotError> {
        let mut guard = self
            .cell
            .lock()
            .map_err(|err| SessionSlotError::remove(err.to_string()))?;
        *guard = None;
        Ok(())
    }
}
