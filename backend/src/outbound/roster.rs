//! Loader for user rosters stored as JSON files.
//!
//! A roster file is a JSON array of user records in the persisted session
//! layout. It replaces the built-in demo accounts when configured.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;

use crate::domain::User;

/// Errors raised while loading a roster file.
#[derive(Debug, Error)]
pub enum RosterLoadError {
    #[error("failed to read roster {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode roster {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and decode the roster at `path`, keeping file order.
pub fn load_roster(path: &Path) -> Result<Vec<User>, RosterLoadError> {
    let io_error = |source| RosterLoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let (parent, file_name) = parent_and_file_name(path).map_err(io_error)?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
    let raw = dir.read_to_string(Path::new(&file_name)).map_err(io_error)?;
    serde_json::from_str(&raw).map_err(|source| RosterLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "roster path must name a file")
    })?;
    Ok((parent, file_name.to_os_string()))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Role;
    use rstest::rstest;

    const FIXTURE_ROSTER: &str = include_str!("../../fixtures/roster.json");

    fn write_roster(dir: &Path, contents: &str) -> PathBuf {
        Dir::open_ambient_dir(dir, ambient_authority())
            .and_then(|handle| handle.write("roster.json", contents))
            .expect("write roster");
        dir.join("roster.json")
    }

    #[rstest]
    fn loads_records_in_file_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_roster(dir.path(), FIXTURE_ROSTER);

        let roster = load_roster(&path).expect("roster loads");
        assert_eq!(roster.len(), 4);
        assert_eq!(roster[0].id().as_ref(), "1");
        assert!(roster[2].has_role(Role::Admin));
    }

    #[rstest]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_roster(&dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(err, RosterLoadError::Io { .. }));
    }

    #[rstest]
    #[case("{}")]
    #[case("[{\"id\": \"\"}]")]
    fn malformed_roster_is_a_decode_error(#[case] contents: &str) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_roster(dir.path(), contents);
        let err = load_roster(&path).expect_err("malformed");
        assert!(matches!(err, RosterLoadError::Decode { .. }));
    }
}
