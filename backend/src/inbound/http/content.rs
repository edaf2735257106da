//! Public practice pages.
//!
//! ```text
//! GET /api/v1/home
//! GET /api/v1/about
//! ```

use actix_web::{get, web};

use crate::domain::Error;
use crate::domain::practice::PracticeContent;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Landing page content.
#[utoipa::path(
    get,
    path = "/api/v1/home",
    responses(
        (status = 200, description = "Home page content", body = PracticeContent),
        (status = 503, description = "Practice data unavailable", body = Error)
    ),
    tags = ["pages"],
    operation_id = "homePage",
    security([])
)]
#[get("/home")]
pub async fn home(state: web::Data<HttpState>) -> ApiResult<web::Json<PracticeContent>> {
    state.practice.content().await.map(web::Json)
}

/// Practice information page content.
#[utoipa::path(
    get,
    path = "/api/v1/about",
    responses(
        (status = 200, description = "About page content", body = PracticeContent),
        (status = 503, description = "Practice data unavailable", body = Error)
    ),
    tags = ["pages"],
    operation_id = "aboutPage",
    security([])
)]
#[get("/about")]
pub async fn about(state: web::Data<HttpState>) -> ApiResult<web::Json<PracticeContent>> {
    state.practice.content().await.map(web::Json)
}
