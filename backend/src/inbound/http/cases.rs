//! Case gallery handler.
//!
//! ```text
//! GET /api/v1/cases?condition=Eczema&sort=successRate&direction=desc
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::practice::{CaseGallery, CaseGalleryQuery, CaseSortField, SortDirection};
use crate::domain::{Error, View};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Gallery filters; every field is optional.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CaseListQuery {
    /// Case-insensitive match against title, condition and tags.
    pub search: Option<String>,
    /// Exact condition, or `All`.
    pub condition: Option<String>,
    /// Sort column; defaults to `treatmentDate`.
    pub sort: Option<CaseSortField>,
    /// Sort direction; newest first for the default column, otherwise `asc`.
    pub direction: Option<SortDirection>,
}

impl From<CaseListQuery> for CaseGalleryQuery {
    fn from(query: CaseListQuery) -> Self {
        let mut gallery = Self {
            search: query.search,
            condition: query.condition,
            ..Self::default()
        };
        if let Some(field) = query.sort.filter(|field| *field != gallery.sort) {
            gallery = gallery.toggle_sort(field);
        }
        if let Some(direction) = query.direction {
            gallery.direction = direction;
        }
        gallery
    }
}

/// Filtered case gallery with its condition picker.
#[utoipa::path(
    get,
    path = "/api/v1/cases",
    params(CaseListQuery),
    responses(
        (status = 200, description = "Case gallery", body = CaseGallery),
        (status = 400, description = "Unknown sort or direction", body = Error),
        (status = 401, description = "Sign-in required; details.redirect names the login view", body = Error),
        (status = 503, description = "Practice data unavailable", body = Error)
    ),
    tags = ["practice"],
    operation_id = "caseGallery"
)]
#[get("/cases")]
pub async fn case_gallery(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<CaseListQuery>,
) -> ApiResult<web::Json<CaseGallery>> {
    session.require(View::CaseGallery)?;
    let query = CaseGalleryQuery::from(query.into_inner());
    state.practice.case_gallery(&query).await.map(web::Json)
}
