//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **session_file**: file-backed session slot for the command-line client.
//! - **roster**: JSON roster loader feeding the fixture credential verifier.
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.

pub mod roster;
pub mod session_file;

pub use roster::{RosterLoadError, load_roster};
pub use session_file::FileSessionSlot;
