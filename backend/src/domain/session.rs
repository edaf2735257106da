//! Session store: the single source of truth for who is signed in.
//!
//! A [`SessionStore`] is constructed by the composition root and handed to
//! every view that needs it. It holds at most one [`Identity`], restores it
//! from durable storage on startup, and drives the sign-in, registration and
//! sign-out transitions.
//!
//! Transitions are serialized by the store itself. A second sign-in or
//! registration while one is in flight is rejected with
//! [`SessionError::TransitionInFlight`]. Signing out invalidates the in-flight
//! transition's ticket, so its eventual result is discarded with
//! [`SessionError::Superseded`] instead of resurrecting the identity. Stores
//! built over the same [`TransitionSlot`] enforce this between each other.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde_json::json;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

use super::ports::{CredentialGateway, GatewayError, SnapshotStorage, SnapshotStorageError};
use super::snapshot::{self, SNAPSHOT_KEY};
use super::{Error, Identity, LoginCredentials, RegistrationDetails};

/// Observable session state.
///
/// `pending` is true until the first restore completes and while a sign-in or
/// registration is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    identity: Option<Identity>,
    pending: bool,
}

impl Session {
    /// Build a session value directly.
    #[must_use]
    pub fn new(identity: Option<Identity>, pending: bool) -> Self {
        Self { identity, pending }
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Whether restore or a transition has yet to settle.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// True iff an identity is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// Which transition produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// `login`.
    SignIn,
    /// `register`.
    Registration,
}

impl Transition {
    fn rejection_message(self) -> &'static str {
        match self {
            Self::SignIn => "Failed to login. Please check your credentials.",
            Self::Registration => "Failed to create an account. Please try again.",
        }
    }
}

/// Errors returned by session transitions.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Another sign-in or registration has not settled yet.
    #[error("a sign-in or registration is already in progress")]
    TransitionInFlight,
    /// A sign-out happened while this transition was in flight.
    #[error("the session was signed out before the transition completed")]
    Superseded,
    /// The credential gateway refused or failed the request.
    #[error("credential gateway failed during {transition:?}: {source}")]
    Gateway {
        /// Transition that called the gateway.
        transition: Transition,
        /// Underlying gateway failure.
        #[source]
        source: GatewayError,
    },
    /// The identity snapshot could not be written or removed.
    #[error("session storage failed: {0}")]
    Storage(#[from] SnapshotStorageError),
}

impl From<SessionError> for Error {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::TransitionInFlight => {
                Error::conflict("A sign-in is already in progress. Please wait.")
            }
            SessionError::Superseded => {
                Error::conflict("You were signed out before the request completed.")
            }
            SessionError::Gateway { transition, source } if source.is_transient() => {
                Error::service_unavailable(format!(
                    "{} The service is temporarily unavailable.",
                    transition.rejection_message()
                ))
                .with_details(json!({ "retryable": true }))
            }
            SessionError::Gateway { transition, .. } => {
                Error::unauthorized(transition.rejection_message())
            }
            SessionError::Storage(err) => Error::internal(format!("session storage failed: {err}")),
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    identity: Option<Identity>,
    restored: bool,
}

#[derive(Debug, Default)]
struct SlotState {
    epoch: u64,
    in_flight: Option<u64>,
}

/// The single sign-in/registration slot and its epoch counter.
///
/// A store owns one by default. Stores that stand for the same client across
/// separate requests share one through [`SessionStore::with_slot`], so a
/// transition started by one request is visible to, and can be superseded
/// by, another.
#[derive(Debug, Default)]
pub struct TransitionSlot {
    state: Mutex<SlotState>,
}

impl TransitionSlot {
    /// A free slot at epoch zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a transition currently holds the slot.
    pub fn is_busy(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn view(state: &StoreState, slot: &SlotState) -> Session {
    Session {
        identity: state.identity.clone(),
        pending: !state.restored || slot.in_flight.is_some(),
    }
}

/// Holder of the current session, generic over its durable storage.
pub struct SessionStore<S> {
    gateway: Arc<dyn CredentialGateway>,
    storage: S,
    state: Mutex<StoreState>,
    slot: Arc<TransitionSlot>,
    changes: watch::Sender<Session>,
}

impl<S: SnapshotStorage> SessionStore<S> {
    /// Create an unrestored store; the session is pending until
    /// [`restore`](Self::restore) runs.
    pub fn new(gateway: Arc<dyn CredentialGateway>, storage: S) -> Self {
        Self::with_slot(gateway, storage, Arc::new(TransitionSlot::new()))
    }

    /// Create an unrestored store whose transitions go through `slot`.
    pub fn with_slot(
        gateway: Arc<dyn CredentialGateway>,
        storage: S,
        slot: Arc<TransitionSlot>,
    ) -> Self {
        let state = StoreState::default();
        let initial = view(&state, &slot.lock());
        let (changes, _) = watch::channel(initial);
        Self {
            gateway,
            storage,
            state: Mutex::new(state),
            slot,
            changes,
        }
    }

    /// Current session value.
    pub fn session(&self) -> Session {
        let state = self.lock();
        let slot = self.slot.lock();
        view(&state, &slot)
    }

    /// True iff an identity is held.
    pub fn is_authenticated(&self) -> bool {
        self.lock().identity.is_some()
    }

    /// Subscribe to session changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.changes.subscribe()
    }

    /// Borrow the backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the persisted identity, treating unreadable or corrupt snapshots
    /// as "signed out". Never fails.
    pub fn restore(&self) {
        let restored = match self.storage.read(SNAPSHOT_KEY) {
            Ok(Some(raw)) => match snapshot::decode(&raw) {
                Ok(identity) => Some(identity),
                Err(err) => {
                    warn!(error = %err, "discarding unreadable session snapshot");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "session snapshot could not be read");
                None
            }
        };

        let mut state = self.lock();
        debug!(
            authenticated = restored.is_some(),
            first = !state.restored,
            "session restored"
        );
        state.identity = restored;
        state.restored = true;
        self.publish(&state, &self.slot.lock());
    }

    /// Sign in with `credentials`.
    ///
    /// On success the snapshot is persisted before the identity is adopted.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Identity, SessionError> {
        self.run(Transition::SignIn, || self.gateway.sign_in(credentials))
            .await
    }

    /// Register a new account and sign in as it.
    pub async fn register(&self, details: &RegistrationDetails) -> Result<Identity, SessionError> {
        self.run(Transition::Registration, || self.gateway.sign_up(details))
            .await
    }

    /// Sign out. Idempotent.
    ///
    /// Memory is cleared before the snapshot is removed, so a storage failure
    /// still leaves the session signed out for this process.
    pub fn logout(&self) -> Result<(), SessionError> {
        let mut state = self.lock();
        let was_signed_in = state.identity.take().is_some();
        {
            let mut slot = self.slot.lock();
            if slot.in_flight.take().is_some() {
                slot.epoch += 1;
                info!("sign-out superseded an in-flight transition");
            }
            self.publish(&state, &slot);
        }

        let removed = self.storage.remove(SNAPSHOT_KEY);
        drop(state);

        if was_signed_in {
            info!("signed out");
        }
        removed.map_err(|err| {
            error!(error = %err, "failed to remove session snapshot");
            SessionError::Storage(err)
        })
    }

    async fn run<F, Fut>(&self, transition: Transition, call: F) -> Result<Identity, SessionError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Identity, GatewayError>>,
    {
        let ticket = self.begin(transition)?;
        let outcome = call().await;
        self.settle(&ticket, transition, outcome)
    }

    fn begin(&self, transition: Transition) -> Result<Ticket<'_, S>, SessionError> {
        let state = self.lock();
        let mut slot = self.slot.lock();
        if slot.in_flight.is_some() {
            debug!(?transition, "rejecting transition while another is pending");
            return Err(SessionError::TransitionInFlight);
        }
        slot.epoch += 1;
        let epoch = slot.epoch;
        slot.in_flight = Some(epoch);
        self.publish(&state, &slot);
        debug!(?transition, epoch, "transition started");
        Ok(Ticket { store: self, epoch })
    }

    fn settle(
        &self,
        ticket: &Ticket<'_, S>,
        transition: Transition,
        outcome: Result<Identity, GatewayError>,
    ) -> Result<Identity, SessionError> {
        let mut state = self.lock();
        let mut slot = self.slot.lock();
        if slot.in_flight != Some(ticket.epoch) {
            info!(?transition, "discarding superseded transition result");
            return Err(SessionError::Superseded);
        }
        slot.in_flight = None;

        let result = outcome
            .map_err(|source| SessionError::Gateway { transition, source })
            .and_then(|identity| self.persist(&identity).map(|()| identity));

        match &result {
            Ok(identity) => {
                state.identity = Some(identity.clone());
                info!(?transition, id = %identity.id(), "session established");
            }
            Err(err) => warn!(?transition, error = %err, "transition failed"),
        }
        self.publish(&state, &slot);
        result
    }

    fn persist(&self, identity: &Identity) -> Result<(), SessionError> {
        let raw = snapshot::encode(identity).map_err(|err| {
            SessionError::Storage(SnapshotStorageError::write(format!(
                "could not encode snapshot: {err}"
            )))
        })?;
        self.storage.write(SNAPSHOT_KEY, &raw).map_err(|err| {
            error!(error = %err, "failed to persist session snapshot");
            SessionError::Storage(err)
        })
    }

    fn publish(&self, state: &StoreState, slot: &SlotState) {
        self.changes.send_replace(view(state, slot));
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Claim on the single transition slot. Dropping it releases the slot if the
/// transition never settled, such as when its future is cancelled.
struct Ticket<'a, S: SnapshotStorage> {
    store: &'a SessionStore<S>,
    epoch: u64,
}

impl<S: SnapshotStorage> Drop for Ticket<'_, S> {
    fn drop(&mut self) {
        let state = self.store.lock();
        let mut slot = self.store.slot.lock();
        if slot.in_flight == Some(self.epoch) {
            slot.in_flight = None;
            debug!(epoch = self.epoch, "transition abandoned");
            self.store.publish(&state, &slot);
        }
    }
}
