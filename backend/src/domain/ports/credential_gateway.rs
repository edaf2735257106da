//! Driven port for the remote credential service.
//!
//! The session store calls this port for sign-in and registration. No real
//! credential service exists yet, so [`FixtureCredentialGateway`] waits out a
//! simulated round trip and fabricates an identity.

use std::time::Duration;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{
    DisplayName, Identity, IdentityId, LoginCredentials, RegistrationDetails, Role,
};

define_port_error! {
    /// Errors surfaced by credential gateway adapters.
    pub enum GatewayError {
        /// The credential service refused the email/password pair.
        InvalidCredentials => "credentials were rejected",
        /// The credential service refused to create the account.
        AccountRejected { message: String } => "account rejected: {message}",
        /// The credential service could not be reached or timed out.
        Unavailable { message: String } => "credential service unavailable: {message}",
    }
}

impl GatewayError {
    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Port for authenticating practitioners against the credential service.
#[async_trait]
pub trait CredentialGateway: Send + Sync {
    /// Exchange credentials for the practitioner's identity.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<Identity, GatewayError>;

    /// Create an account and return the new practitioner's identity.
    async fn sign_up(&self, details: &RegistrationDetails) -> Result<Identity, GatewayError>;
}

/// Simulated round trip of the fixture gateway.
pub const DEFAULT_GATEWAY_LATENCY: Duration = Duration::from_millis(1000);

const FIXTURE_NAME: &str = "Dr. John Doe";
const FIXTURE_SPECIALIZATION: &str = "Homeopathic Physician";
const FIXTURE_PROFILE_IMAGE: &str = "https://images.pexels.com/photos/5452293/pexels-photo-5452293.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2";

/// In-process stand-in for the credential service. It never rejects.
#[derive(Debug, Clone, Copy)]
pub struct FixtureCredentialGateway {
    latency: Duration,
}

impl FixtureCredentialGateway {
    /// Gateway that waits `latency` before answering.
    #[must_use]
    pub const fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Configured round-trip latency.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for FixtureCredentialGateway {
    fn default() -> Self {
        Self::with_latency(DEFAULT_GATEWAY_LATENCY)
    }
}

#[async_trait]
impl CredentialGateway for FixtureCredentialGateway {
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<Identity, GatewayError> {
        self.round_trip().await;
        let name = DisplayName::new(FIXTURE_NAME)
            .map_err(|err| GatewayError::unavailable(format!("invalid fixture name: {err}")))?;
        Ok(Identity::new(
            IdentityId::random(),
            name,
            credentials.email().clone(),
            Role::Practitioner,
        )
        .with_profile_image(FIXTURE_PROFILE_IMAGE)
        .with_specialization(FIXTURE_SPECIALIZATION))
    }

    async fn sign_up(&self, details: &RegistrationDetails) -> Result<Identity, GatewayError> {
        self.round_trip().await;
        Ok(Identity::new(
            IdentityId::random(),
            details.name().clone(),
            details.email().clone(),
            Role::Practitioner,
        ))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use tokio::time::Instant;

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn sign_in_waits_and_fabricates_practitioner() {
        let gateway = FixtureCredentialGateway::default();
        let creds = LoginCredentials::try_from_parts("a@b.com", "pw").expect("credentials");
        let started = Instant::now();

        let identity = gateway.sign_in(&creds).await.expect("fixture never rejects");

        assert!(started.elapsed() >= DEFAULT_GATEWAY_LATENCY);
        assert_eq!(identity.email().as_str(), "a@b.com");
        assert_eq!(identity.name().as_str(), FIXTURE_NAME);
        assert_eq!(identity.role(), Role::Practitioner);
        assert_eq!(identity.specialization(), Some(FIXTURE_SPECIALIZATION));
        assert_eq!(identity.profile_image(), Some(FIXTURE_PROFILE_IMAGE));
    }

    #[rstest]
    #[tokio::test]
    async fn sign_up_binds_name_and_email_without_extras() {
        let gateway = FixtureCredentialGateway::with_latency(Duration::ZERO);
        let details = RegistrationDetails::try_from_parts("new@doc.com", "secret1", "Dr. New")
            .expect("details");

        let identity = gateway.sign_up(&details).await.expect("fixture never rejects");

        assert_eq!(identity.name().as_str(), "Dr. New");
        assert_eq!(identity.email().as_str(), "new@doc.com");
        assert!(identity.profile_image().is_none());
        assert!(identity.specialization().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn each_sign_in_gets_a_fresh_id() {
        let gateway = FixtureCredentialGateway::with_latency(Duration::ZERO);
        let creds = LoginCredentials::try_from_parts("a@b.com", "pw").expect("credentials");

        let first = gateway.sign_in(&creds).await.expect("first");
        let second = gateway.sign_in(&creds).await.expect("second");

        assert_ne!(first.id(), second.id());
    }

    #[rstest]
    #[case(GatewayError::invalid_credentials(), false)]
    #[case(GatewayError::account_rejected("exists"), false)]
    #[case(GatewayError::unavailable("timeout"), true)]
    fn transient_classification(#[case] error: GatewayError, #[case] expected: bool) {
        assert_eq!(error.is_transient(), expected);
    }
}
