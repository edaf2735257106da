//! Server settings and the assembled configuration object.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use careandcure::inbound::http::session_config::SessionSettings;

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));
const DEFAULT_GATEWAY_LATENCY_MS: u64 = 1_000;

/// Listener and collaborator settings loaded via OrthoConfig.
///
/// Environment variables use the `CARECURE_` prefix, e.g.
/// `CARECURE_BIND_ADDR=127.0.0.1:9000`.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CARECURE")]
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<SocketAddr>,
    /// Simulated round trip of the credential gateway, in milliseconds.
    pub gateway_latency_ms: Option<u64>,
}

impl ServerSettings {
    /// Configured bind address or `0.0.0.0:8080`.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured gateway latency or one second.
    #[must_use]
    pub fn gateway_latency(&self) -> Duration {
        Duration::from_millis(
            self.gateway_latency_ms
                .unwrap_or(DEFAULT_GATEWAY_LATENCY_MS),
        )
    }
}

/// Everything `create_server` needs, validated up front.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) gateway_latency: Duration,
}

impl ServerConfig {
    /// Combine validated cookie settings with the listener settings.
    #[must_use]
    pub fn new(session: SessionSettings, settings: &ServerSettings) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr: settings.bind_addr(),
            gateway_latency: settings.gateway_latency(),
        }
    }
}
