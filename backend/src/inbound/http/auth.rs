//! Sign-in, registration, sign-out and session handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"doctor@example.com","password":"secret"}
//! POST /api/v1/register {"name":"Dr. New","email":"new@doc.com",...}
//! POST /api/v1/logout
//! GET /api/v1/session
//! ```
//!
//! Forms are validated before the session store is touched, so a rejected
//! form never starts a transition. A sign-in or registration that overlaps
//! another from the same client is refused with 409, and one overtaken by a
//! sign-out is refused with 409 without touching the cookie.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, Identity, LoginCredentials, RegistrationDetails, RegistrationForm, Session,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::validation::{login_validation_error, registration_validation_error};

/// Sign-in form.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email.
    #[schema(example = "doctor@example.com")]
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Registration form.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    /// Display name.
    #[schema(example = "Dr. Jane Roe")]
    pub name: String,
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Must repeat `password`.
    pub confirm_password: String,
    /// Terms and conditions checkbox.
    #[serde(default)]
    pub accept_terms: bool,
}

/// Session as seen by the client.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// True iff an identity is held.
    pub authenticated: bool,
    /// True while restoring or while a transition is in flight.
    pub pending: bool,
    /// The signed-in identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

impl From<Session> for SessionView {
    fn from(session: Session) -> Self {
        Self {
            authenticated: session.is_authenticated(),
            pending: session.is_pending(),
            identity: session.identity().cloned(),
        }
    }
}

fn session_view(session: &SessionContext) -> web::Json<SessionView> {
    web::Json(SessionView::from(session.session()))
}

/// Sign in and persist the identity snapshot in the session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionView,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank email or password", body = Error),
        (status = 401, description = "Failed to login. Please check your credentials.", body = Error),
        (status = 409, description = "Another sign-in is in progress, or a sign-out overtook this one", body = Error),
        (status = 503, description = "Credential service unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionView>> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&email, &password)
        .map_err(|err| login_validation_error(&err))?;
    session.login(&credentials).await?;
    Ok(session_view(&session))
}

/// Create an account and sign in as it.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegistrationRequest,
    responses(
        (status = 200, description = "Account created and signed in", body = SessionView),
        (status = 400, description = "Form rejected", body = Error),
        (status = 401, description = "Failed to create an account. Please try again.", body = Error),
        (status = 409, description = "Another sign-in is in progress", body = Error),
        (status = 503, description = "Credential service unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    session: SessionContext,
    payload: web::Json<RegistrationRequest>,
) -> ApiResult<web::Json<SessionView>> {
    let form = payload.into_inner();
    let details = RegistrationDetails::try_from_form(RegistrationForm {
        name: &form.name,
        email: &form.email,
        password: &form.password,
        confirm_password: &form.confirm_password,
        accept_terms: form.accept_terms,
    })
    .map_err(|err| registration_validation_error(&err))?;
    session.register(&details).await?;
    Ok(session_view(&session))
}

/// Sign out. Succeeds when already signed out.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Signed out"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.logout()?;
    Ok(HttpResponse::NoContent().finish())
}

/// Current session.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Current session", body = SessionView)
    ),
    tags = ["session"],
    operation_id = "currentSession",
    security([])
)]
#[get("/session")]
pub async fn current_session(session: SessionContext) -> web::Json<SessionView> {
    session_view(&session)
}
