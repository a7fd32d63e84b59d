//! File-backed [`SessionSlot`] for command-line clients.
//!
//! The slot is a single JSON file inside a state directory. Access goes
//! through a `cap_std` directory handle so the adapter cannot touch anything
//! outside that directory.

use std::io;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};

use crate::domain::ports::{SESSION_SLOT_KEY, SessionSlot, SessionSlotError};

const STAGING_SUFFIX: &str = ".tmp";

/// Session slot stored as `<state_dir>/user.json`.
#[derive(Debug)]
pub struct FileSessionSlot {
    dir: Dir,
    file_name: String,
}

impl FileSessionSlot {
    /// Open (creating if needed) `state_dir` and bind the slot file in it.
    pub fn open(state_dir: &Path) -> io::Result<Self> {
        Dir::create_ambient_dir_all(state_dir, ambient_authority())?;
        let dir = Dir::open_ambient_dir(state_dir, ambient_authority())?;
        Ok(Self {
            dir,
            file_name: format!("{SESSION_SLOT_KEY}.json"),
        })
    }

    /// Name of the slot file inside the state directory.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    fn staging_name(&self) -> String {
        format!("{}{STAGING_SUFFIX}", self.file_name)
    }
}

impl SessionSlot for FileSessionSlot {
    fn load(&self) -> Result<Option<String>, SessionSlotError> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(record) => Ok(Some(record)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SessionSlotError::read(err.to_string())),
        }
    }

    /// Write to a staging file, then rename over the slot so readers never
    /// observe a partial record.
    fn store(&self, record: &str) -> Result<(), SessionSlotError> {
        let staging = self.staging_name();
        self.dir
            .write(&staging, record.as_bytes())
            .map_err(|err| SessionSlotError::write(err.to_string()))?;
        self.dir
            .rename(&staging, &self.dir, &self.file_name)
            .map_err(|err| SessionSlotError::write(err.to_string()))
    }

    fn remove(&self) -> Result<(), SessionSlotError> {
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionSlotError::remove(err.to_string())),
        }
    }
}
