//! Settings handed from `main` to [`super::create_server`].

use std::net::SocketAddr;
use std::path::PathBuf;

use colipass::inbound::http::session_config::SessionSettings;

#[cfg(feature = "metrics")]
use super::metrics::MetricsLayer;

pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    /// JSON roster replacing the embedded accounts.
    pub(crate) roster_path: Option<PathBuf>,
    #[cfg(feature = "metrics")]
    pub(crate) metrics: MetricsLayer,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            roster_path: None,
            #[cfg(feature = "metrics")]
            metrics: MetricsLayer::Disabled,
        }
    }

    #[must_use]
    pub fn with_roster_path(self, roster_path: Option<PathBuf>) -> Self {
        Self {
            roster_path,
            ..self
        }
    }

    /// Serve Prometheus metrics on `/metrics`.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(self, metrics: MetricsLayer) -> Self {
        Self { metrics, ..self }
    }
}
