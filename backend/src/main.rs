//! Backend entry-point: loads settings, wires the session cookie and serves the API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use careandcure::inbound::http::health::HealthState;
use careandcure::inbound::http::session_config::fingerprint::key_fingerprint;
use careandcure::inbound::http::session_config::{BuildMode, session_settings_from_env};
use server::{ServerConfig, ServerSettings, create_server};

fn load_settings(args: impl IntoIterator<Item = OsString>) -> Result<ServerSettings> {
    ServerSettings::load_from_iter(args).map_err(|e| eyre!("failed to load server settings: {e}"))
}

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

    let settings = load_settings(std::env::args_os())?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .context("invalid session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let config = ServerConfig::new(session, &settings);
    let bind_addr = settings.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .with_context(|| format!("failed to start server on {bind_addr}"))?;
    info!(%bind_addr, "listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result.context("server terminated with an error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_load_through_the_entry_point() {
        let _guard = env_lock::lock_env([
            ("CARECURE_BIND_ADDR", None::<String>),
            ("CARECURE_GATEWAY_LATENCY_MS", Some("250".to_owned())),
        ]);
        let settings = load_settings([OsString::from("careandcure")]).expect("settings");
        assert_eq!(settings.gateway_latency().as_millis(), 250);
    }
}
