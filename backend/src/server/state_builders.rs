//! Builders for the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use careandcure::domain::ports::FixtureCredentialGateway;
use careandcure::inbound::http::state::{HttpState, HttpStatePorts};
use careandcure::outbound::practice_fixtures::BundledPracticeRepository;

use super::ServerConfig;

/// Wire the bundled registry, the fixture gateway and the system clock.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the bundled practice registry fails
/// validation.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let practice = BundledPracticeRepository::bundled().map_err(|e| {
        std::io::Error::other(format!("bundled practice registry is invalid: {e}"))
    })?;
    info!(
        latency_ms = config.gateway_latency.as_millis(),
        "credential gateway fixture enabled"
    );
    Ok(web::Data::new(HttpState::new(HttpStatePorts {
        gateway: Arc::new(FixtureCredentialGateway::with_latency(
            config.gateway_latency,
        )),
        practice: Arc::new(practice),
        clock: Arc::new(DefaultClock),
    })))
}
