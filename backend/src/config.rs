//! Process settings loaded via OrthoConfig.
//!
//! The server reads `COLIPASS_*` variables and the CLI reads
//! `COLIPASS_CLI_*`; both also accept matching command-line flags and
//! configuration files.

use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{Locale, UnsupportedLocale};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STATE_DIR: &str = ".colipass";
const DEFAULT_LOCALE: &str = "fr";

/// Settings for the HTTP server binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COLIPASS")]
pub struct ServerSettings {
    /// Listen address, `host:port`.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// JSON roster replacing the embedded fixture accounts.
    pub roster_path: Option<PathBuf>,
}

impl ServerSettings {
    /// Configured listen address, `0.0.0.0:8080` unless overridden.
    ///
    /// # Errors
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.trim().parse()
    }
}

/// Settings for the `colipass-session` command-line client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COLIPASS_CLI")]
pub struct CliSettings {
    /// Directory holding the persisted session slot.
    #[ortho_config(default = PathBuf::from(DEFAULT_STATE_DIR))]
    pub state_dir: PathBuf,
    /// Locale used by `translate` when none is given.
    #[ortho_config(default = DEFAULT_LOCALE.to_owned())]
    pub default_locale: String,
}

impl CliSettings {
    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// Configured locale, French unless overridden.
    ///
    /// # Errors
    /// Returns [`UnsupportedLocale`] for codes other than `fr` and `en`.
    pub fn default_locale(&self) -> Result<Locale, UnsupportedLocale> {
        self.default_locale.parse()
    }
}
