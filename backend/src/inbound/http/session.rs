//! Session plumbing between the signed cookie and the domain session store.
//!
//! [`CookieSnapshotStorage`] backs the store's durable slot with the client's
//! signed session cookie. [`SessionContext`] builds a restored store for each
//! request so handlers only deal with sign-in, sign-out and view guarding.
//!
//! The cookie also carries a random client id. Every request from that client
//! shares one [`TransitionSlot`] taken from [`ClientSlots`], so a second
//! sign-in is rejected while the first is in flight and a sign-out discards
//! the result of a sign-in that is still running.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use actix_session::Session as CookieSession;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{CredentialGateway, SnapshotStorage, SnapshotStorageError};
use crate::domain::{
    Error, Identity, LoginCredentials, RegistrationDetails, RouteDecision, RouteGuard, Session,
    SessionError, SessionStore, TransitionSlot, View,
};

use super::error::login_required;
use super::state::HttpState;

/// Snapshot slot stored inside the actix cookie session.
#[derive(Clone)]
pub struct CookieSnapshotStorage(CookieSession);

impl CookieSnapshotStorage {
    /// Wrap the request's cookie session.
    pub fn new(session: CookieSession) -> Self {
        Self(session)
    }
}

impl SnapshotStorage for CookieSnapshotStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SnapshotStorageError> {
        self.0
            .get::<String>(key)
            .map_err(|err| SnapshotStorageError::read(err.to_string()))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SnapshotStorageError> {
        self.0
            .insert(key, value)
            .map_err(|err| SnapshotStorageError::write(err.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), SnapshotStorageError> {
        self.0.remove(key);
        Ok(())
    }
}

/// Cookie key holding the client id.
pub const CLIENT_KEY: &str = "client";

/// Transition slots keyed by client id.
///
/// Entries are weak: a slot lives while some request for that client holds
/// it, and a fresh one is handed out once every such request has finished.
#[derive(Debug, Default)]
pub struct ClientSlots {
    slots: Mutex<HashMap<String, Weak<TransitionSlot>>>,
}

impl ClientSlots {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot shared by every live request from `client`.
    pub fn slot_for(&self, client: &str) -> Arc<TransitionSlot> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = slots.get(client).and_then(Weak::upgrade) {
            return slot;
        }
        slots.retain(|_, slot| slot.strong_count() > 0);
        let slot = Arc::new(TransitionSlot::new());
        slots.insert(client.to_owned(), Arc::downgrade(&slot));
        slot
    }

    /// Number of clients with a request in progress.
    pub fn live(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.strong_count() > 0)
            .count()
    }
}

struct ClientId {
    id: String,
    issued: bool,
}

impl ClientId {
    fn from_cookie(cookie: &CookieSession) -> Self {
        match cookie.get::<String>(CLIENT_KEY) {
            Ok(Some(id)) => Self { id, issued: true },
            _ => Self {
                id: Uuid::new_v4().to_string(),
                issued: false,
            },
        }
    }
}

/// Restored session store for the current request.
pub struct SessionContext {
    store: SessionStore<CookieSnapshotStorage>,
    guard: RouteGuard,
    client: ClientId,
    cookie: CookieSession,
}

impl SessionContext {
    /// Build a store over `cookie`, joined to the client's transition slot,
    /// and restore the persisted identity.
    pub fn restore(
        gateway: Arc<dyn CredentialGateway>,
        guard: RouteGuard,
        slots: &ClientSlots,
        cookie: CookieSession,
    ) -> Self {
        let client = ClientId::from_cookie(&cookie);
        let slot = slots.slot_for(&client.id);
        let store =
            SessionStore::with_slot(gateway, CookieSnapshotStorage::new(cookie.clone()), slot);
        store.restore();
        Self {
            store,
            guard,
            client,
            cookie,
        }
    }

    /// Sign in through the store after pinning the client id in the cookie.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        self.issue_client_id()?;
        Ok(self.store.login(credentials).await?)
    }

    /// Register through the store after pinning the client id in the cookie.
    pub async fn register(&self, details: &RegistrationDetails) -> Result<Identity, Error> {
        self.issue_client_id()?;
        Ok(self.store.register(details).await?)
    }

    /// Sign out, superseding any transition this client has in flight.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.logout()
    }

    fn issue_client_id(&self) -> Result<(), Error> {
        if self.client.issued {
            return Ok(());
        }
        self.cookie
            .insert(CLIENT_KEY, &self.client.id)
            .map_err(|err| Error::internal(format!("could not store client id: {err}")))
    }

    /// The underlying session store.
    pub fn store(&self) -> &SessionStore<CookieSnapshotStorage> {
        &self.store
    }

    /// View access table used by [`require`](Self::require).
    pub fn guard(&self) -> RouteGuard {
        self.guard
    }

    /// Current session value.
    pub fn session(&self) -> Session {
        self.store.session()
    }

    /// Evaluate the guard for `view` and return the identity allowed to see
    /// it.
    ///
    /// Public views have no identity requirement, so callers should only use
    /// this for authenticated views.
    pub fn require(&self, view: View) -> Result<Identity, Error> {
        let descriptor = self
            .guard
            .descriptor(view)
            .ok_or_else(|| Error::internal(format!("view {view:?} is not registered")))?;
        let session = self.store.session();
        match self.guard.decide(&session, descriptor.access) {
            RouteDecision::Render => session.identity().cloned().ok_or_else(login_required),
            RouteDecision::RedirectToLogin => Err(login_required()),
            RouteDecision::Defer => Err(Error::service_unavailable("Session is still loading.")
                .with_details(json!({ "retryable": true }))),
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let cookie = CookieSession::from_request(req, payload);
        Box::pin(async move {
            let state = state.ok_or_else(|| {
                actix_web::Error::from(Error::internal("HTTP state is not configured"))
            })?;
            let cookie = cookie.await?;
            Ok(Self::restore(
                state.gateway.clone(),
                state.guard,
                &state.slots,
                cookie,
            ))
        })
    }
}
