//! Domain primitives, the session state machine and the practice screens.
//!
//! Purpose: keep session, access and screen logic free of HTTP concerns.
//! Inbound adapters translate requests into these types; outbound adapters
//! implement the [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic error payload.
//! - Identity and its newtypes — the signed-in practitioner.
//! - LoginCredentials / RegistrationDetails — validated form input.
//! - Session / SessionStore — the session state machine.
//! - RouteGuard — access decisions per view.
//! - practice — patient, case gallery and dashboard view models.

pub mod auth;
pub mod error;
pub mod identity;
pub mod ports;
pub mod practice;
pub mod route_guard;
pub mod session;
pub mod snapshot;
pub mod trace_id;

pub use self::auth::{
    LoginCredentials, LoginValidationError, RegistrationDetails, RegistrationForm,
    RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::identity::{
    DisplayName, EmailAddress, Identity, IdentityId, IdentityValidationError, Role,
};
pub use self::route_guard::{
    Access, LOGIN_PATH, ResolvedView, RouteDecision, RouteGuard, View, ViewDescriptor,
};
pub use self::session::{Session, SessionError, SessionStore, Transition, TransitionSlot};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use careandcure::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such patient"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
