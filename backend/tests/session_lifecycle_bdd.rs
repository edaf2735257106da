//! Behaviour tests for the session store lifecycle.
//!
//! These scenarios drive sign-in, restore, sign-out and the route guard
//! against in-memory snapshot storage with the gateway's simulated latency
//! running on a paused clock.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::cell::RefCell;
use std::sync::Arc;

use careandcure::domain::ports::{
    CredentialGateway, FixtureCredentialGateway, InMemorySnapshotStorage,
};
use careandcure::domain::snapshot::SNAPSHOT_KEY;
use careandcure::domain::{
    Access, Identity, LoginCredentials, RouteDecision, RouteGuard, SessionError, SessionStore,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

type Outcome = Result<Identity, SessionError>;

struct SessionWorld {
    runtime: Runtime,
    gateway: Arc<dyn CredentialGateway>,
    storage: RefCell<InMemorySnapshotStorage>,
    store: RefCell<Option<SessionStore<InMemorySnapshotStorage>>>,
    outcomes: RefCell<Vec<Outcome>>,
    decision: RefCell<Option<RouteDecision>>,
}

impl SessionWorld {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .expect("paused runtime");
        Self {
            runtime,
            gateway: Arc::new(FixtureCredentialGateway::default()),
            storage: RefCell::new(InMemorySnapshotStorage::new()),
            store: RefCell::new(None),
            outcomes: RefCell::new(Vec::new()),
            decision: RefCell::new(None),
        }
    }

    fn use_storage(&self, storage: InMemorySnapshotStorage) {
        *self.storage.borrow_mut() = storage;
        self.fresh_store();
    }

    fn fresh_store(&self) {
        let store = SessionStore::new(self.gateway.clone(), self.storage.borrow().clone());
        store.restore();
        *self.store.borrow_mut() = Some(store);
    }

    fn with_store<T>(&self, f: impl FnOnce(&SessionStore<InMemorySnapshotStorage>) -> T) -> T {
        let store = self.store.borrow();
        f(store.as_ref().expect("store initialised"))
    }

    fn sign_in(&self, email: &str) {
        let credentials = credentials(email);
        let outcome = self.with_store(|store| self.runtime.block_on(store.login(&credentials)));
        self.outcomes.borrow_mut().push(outcome);
    }

    fn stored_snapshot(&self) -> Option<String> {
        self.storage.borrow().peek(SNAPSHOT_KEY)
    }
}

fn credentials(email: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(email, "password").expect("valid credentials")
}

#[fixture]
fn world() -> SessionWorld {
    SessionWorld::new()
}

#[given("an empty snapshot storage")]
fn an_empty_snapshot_storage(world: &SessionWorld) {
    world.use_storage(InMemorySnapshotStorage::new());
}

#[given("a snapshot storage holding \"{raw}\"")]
fn a_snapshot_storage_holding(world: &SessionWorld, raw: String) {
    world.use_storage(InMemorySnapshotStorage::with_entry(SNAPSHOT_KEY, &raw));
}

#[given("snapshot writes fail")]
fn snapshot_writes_fail(world: &SessionWorld) {
    world.storage.borrow().set_fail_writes(true);
}

#[given("the practitioner signs in as \"{email}\"")]
fn the_practitioner_has_signed_in_as(world: &SessionWorld, email: String) {
    world.sign_in(&email);
}

#[when("the practitioner signs in as \"{email}\"")]
fn the_practitioner_signs_in_as(world: &SessionWorld, email: String) {
    world.sign_in(&email);
}

#[when("the session is restored in a fresh store")]
fn the_session_is_restored_in_a_fresh_store(world: &SessionWorld) {
    world.fresh_store();
}

#[when("the practitioner signs out")]
fn the_practitioner_signs_out(world: &SessionWorld) {
    world
        .with_store(SessionStore::logout)
        .expect("sign-out succeeds");
}

#[when("two sign-ins start together")]
fn two_sign_ins_start_together(world: &SessionWorld) {
    let first = credentials("john@example.com");
    let second = credentials("jane@example.com");
    let (a, b) = world.with_store(|store| {
        world
            .runtime
            .block_on(async { tokio::join!(store.login(&first), store.login(&second)) })
    });
    world.outcomes.borrow_mut().extend([a, b]);
}

#[when("the dashboard view is checked during a sign-in")]
fn the_dashboard_view_is_checked_during_a_sign_in(world: &SessionWorld) {
    let guard = RouteGuard::default();
    let creds = credentials("john@example.com");
    let (outcome, decision) = world.with_store(|store| {
        world.runtime.block_on(async {
            tokio::join!(store.login(&creds), async {
                guard.decide(&store.session(), Access::Authenticated)
            })
        })
    });
    world.outcomes.borrow_mut().push(outcome);
    *world.decision.borrow_mut() = Some(decision);
}

#[then("the session is authenticated as \"{name}\"")]
fn the_session_is_authenticated_as(world: &SessionWorld, name: String) {
    let session = world.with_store(SessionStore::session);
    let identity = session.identity().expect("signed in");
    assert_eq!(identity.name().as_str(), name);
    assert!(!session.is_pending());
}

#[then("the session is signed out")]
fn the_session_is_signed_out(world: &SessionWorld) {
    let session = world.with_store(SessionStore::session);
    assert!(!session.is_authenticated());
    assert!(!session.is_pending());
}

#[then("a snapshot is stored")]
fn a_snapshot_is_stored(world: &SessionWorld) {
    let raw = world.stored_snapshot().expect("snapshot present");
    assert!(raw.contains("john@example.com"));
}

#[then("no snapshot is stored")]
fn no_snapshot_is_stored(world: &SessionWorld) {
    assert!(world.stored_snapshot().is_none());
}

#[then("the dashboard view redirects to the sign-in view")]
fn the_dashboard_view_redirects(world: &SessionWorld) {
    let session = world.with_store(SessionStore::session);
    assert_eq!(
        RouteGuard::default().decide(&session, Access::Authenticated),
        RouteDecision::RedirectToLogin
    );
}

#[then("the transition fails with a storage error")]
fn the_transition_fails_with_a_storage_error(world: &SessionWorld) {
    let outcomes = world.outcomes.borrow();
    assert!(matches!(
        outcomes.last(),
        Some(Err(SessionError::Storage(_)))
    ));
}

#[then("the second sign-in is rejected as in flight")]
fn the_second_sign_in_is_rejected(world: &SessionWorld) {
    let outcomes = world.outcomes.borrow();
    assert!(matches!(outcomes.first(), Some(Ok(_))));
    assert!(matches!(
        outcomes.get(1),
        Some(Err(SessionError::TransitionInFlight))
    ));
}

#[then("the dashboard view was deferred")]
fn the_dashboard_view_was_deferred(world: &SessionWorld) {
    assert_eq!(*world.decision.borrow(), Some(RouteDecision::Defer));
    assert!(matches!(world.outcomes.borrow().first(), Some(Ok(_))));
}

#[scenario(path = "tests/features/session_lifecycle.feature", index = 0)]
fn signing_in_persists_the_snapshot(world: SessionWorld) {
    drop(world);
}

#[scenario(path = "tests/features/session_lifecycle.feature", index = 1)]
fn stored_snapshot_survives_reload(world: SessionWorld) {
    drop(world);
}

#[scenario(path = "tests/features/session_lifecycle.feature", index = 2)]
fn corrupt_snapshot_restores_signed_out(world: SessionWorld) {
    drop(world);
}

#[scenario(path = "tests/features/session_lifecycle.feature", index = 3)]
fn signing_out_removes_the_snapshot(world: SessionWorld) {
    drop(world);
}

#[scenario(path = "tests/features/session_lifecycle.feature", index = 4)]
fn failed_write_leaves_session_signed_out(world: SessionWorld) {
    drop(world);
}

#[scenario(path = "tests/features/session_lifecycle.feature", index = 5)]
fn concurrent_sign_in_is_rejected(world: SessionWorld) {
    drop(world);
}

#[scenario(path = "tests/features/session_lifecycle.feature", index = 6)]
fn protected_views_wait_for_pending_sign_in(world: SessionWorld) {
    drop(world);
}
