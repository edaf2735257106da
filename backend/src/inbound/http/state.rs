//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` so they only depend
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::RouteGuard;
use crate::domain::ports::{CredentialGateway, PracticeRepository};
use crate::domain::practice::PracticeService;

use super::session::ClientSlots;

/// Parameter object bundling the port implementations.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Sign-in and registration backend.
    pub gateway: Arc<dyn CredentialGateway>,
    /// Patients, appointments, cases and practice content.
    pub practice: Arc<dyn PracticeRepository>,
    /// Source of "today" for date-relative figures.
    pub clock: Arc<dyn Clock + Send + Sync>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential gateway handed to each request's session store.
    pub gateway: Arc<dyn CredentialGateway>,
    /// Practice screens.
    pub practice: PracticeService,
    /// View access table.
    pub guard: RouteGuard,
    /// Per-client transition slots shared across requests.
    pub slots: Arc<ClientSlots>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use careandcure::domain::ports::FixtureCredentialGateway;
    /// use careandcure::inbound::http::state::{HttpState, HttpStatePorts};
    /// use careandcure::outbound::practice_fixtures::BundledPracticeRepository;
    /// use mockable::DefaultClock;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let state = HttpState::new(HttpStatePorts {
    ///     gateway: Arc::new(FixtureCredentialGateway::default()),
    ///     practice: Arc::new(BundledPracticeRepository::bundled()?),
    ///     clock: Arc::new(DefaultClock),
    /// });
    /// assert_eq!(state.guard.views().len(), 8);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            gateway,
            practice,
            clock,
        } = ports;
        Self {
            gateway,
            practice: PracticeService::new(practice, clock),
            guard: RouteGuard::default(),
            slots: Arc::new(ClientSlots::new()),
        }
    }
}
