//! Backend entry-point: loads settings, wires REST endpoints and starts the
//! HTTP server.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use colipass::config::ServerSettings;
use colipass::inbound::http::health::HealthState;
use colipass::inbound::http::session_config::{BuildMode, session_settings_from_env};
use ortho_config::OrthoConfig;
#[cfg(feature = "metrics")]
use server::MetricsLayer;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .context("failed to load server settings")?;
    let bind_addr = settings.bind_addr().context("invalid COLIPASS_BIND_ADDR")?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .context("invalid session cookie configuration")?;
    info!(fingerprint = %session.fingerprint, "session key loaded");

    let config = ServerConfig::new(session, bind_addr).with_roster_path(settings.roster_path);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(MetricsLayer::prometheus()?);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await.context("server terminated")?;
    Ok(())
}
