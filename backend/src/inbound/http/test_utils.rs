//! Test helpers for inbound HTTP components.

use std::sync::Arc;
use std::time::Duration;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use chrono::{TimeZone, Utc};
use mockable::MockClock;

use crate::domain::ports::FixtureCredentialGateway;
use crate::outbound::practice_fixtures::BundledPracticeRepository;

use super::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing key per invocation.
/// - Names the cookie `session` and drops the `Secure` flag for plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// State over the bundled registry, an instant gateway and a clock pinned to
/// 1 April 2025.
pub fn test_state() -> HttpState {
    let today = Utc
        .with_ymd_and_hms(2025, 4, 1, 9, 0, 0)
        .single()
        .expect("valid fixed instant");
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(today);
    HttpState::new(HttpStatePorts {
        gateway: Arc::new(FixtureCredentialGateway::with_latency(Duration::ZERO)),
        practice: Arc::new(BundledPracticeRepository::bundled().expect("bundled registry")),
        clock: Arc::new(clock),
    })
}
