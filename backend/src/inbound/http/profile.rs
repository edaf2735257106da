//! Practitioner profile.

use actix_web::{get, web};

use crate::domain::practice::PractitionerProfile;
use crate::domain::{Error, View};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Profile of the signed-in practitioner merged over the practice profile.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Practitioner profile", body = PractitionerProfile),
        (status = 401, description = "Sign-in required; details.redirect names the login view", body = Error),
        (status = 503, description = "Practice data unavailable", body = Error)
    ),
    tags = ["practice"],
    operation_id = "practitionerProfile"
)]
#[get("/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<PractitionerProfile>> {
    let identity = session.require(View::DoctorProfile)?;
    state.practice.profile(&identity).await.map(web::Json)
}
