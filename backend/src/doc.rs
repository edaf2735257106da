//! OpenAPI document for the practice API.
//!
//! [`ApiDoc`] registers every handler under `inbound::http`, the view-model
//! schemas and the session cookie security scheme. Debug builds serve it
//! through Swagger UI; `openapi-dump` prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::practice::{
    CaseGallery, Dashboard, PatientRecord, PatientSummary, PracticeContent, PractitionerProfile,
};
use crate::domain::{Error, ErrorCode, Identity};
use crate::inbound::http::auth::{LoginRequest, RegistrationRequest, SessionView};
use crate::inbound::http::views::ViewEvaluation;

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Signed cookie holding the identity snapshot; issued by login and register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "CareAndCure practice API",
        description = "Session lifecycle, view guarding and practice screens for the CareAndCure homeopathy practice."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::views::evaluate_view,
        crate::inbound::http::content::home,
        crate::inbound::http::content::about,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::patients::list_patients,
        crate::inbound::http::patients::patient_record,
        crate::inbound::http::cases::case_gallery,
        crate::inbound::http::profile::profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Identity,
        LoginRequest,
        RegistrationRequest,
        SessionView,
        ViewEvaluation,
        PracticeContent,
        Dashboard,
        PatientSummary,
        PatientRecord,
        CaseGallery,
        PractitionerProfile,
    )),
    tags(
        (name = "session", description = "Sign-in, registration and sign-out"),
        (name = "views", description = "Navigation guard verdicts"),
        (name = "pages", description = "Public practice pages"),
        (name = "practice", description = "Screens for the signed-in practitioner"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
