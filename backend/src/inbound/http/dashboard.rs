//! Practitioner dashboard.

use actix_web::{get, web};

use crate::domain::practice::Dashboard;
use crate::domain::{Error, View};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Dashboard for the signed-in practitioner.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = Dashboard),
        (status = 401, description = "Sign-in required; details.redirect names the login view", body = Error),
        (status = 503, description = "Practice data unavailable", body = Error)
    ),
    tags = ["practice"],
    operation_id = "dashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Dashboard>> {
    let identity = session.require(View::Dashboard)?;
    state.practice.dashboard(&identity).await.map(web::Json)
}
