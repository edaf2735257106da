//! Patient directory and patient record handlers.
//!
//! ```text
//! GET /api/v1/patients?search=eczema&status=active&sort=progress&direction=desc
//! GET /api/v1/patients/1
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::practice::{
    PatientDirectoryQuery, PatientRecord, PatientSortField, PatientStatus, PatientSummary,
    SortDirection,
};
use crate::domain::{Error, View};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Directory filters; every field is optional.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatientListQuery {
    /// Case-insensitive match against name and condition.
    pub search: Option<String>,
    /// Only patients with this status.
    pub status: Option<PatientStatus>,
    /// Sort column; defaults to `name`.
    pub sort: Option<PatientSortField>,
    /// Sort direction; defaults to `asc`.
    pub direction: Option<SortDirection>,
}

impl From<PatientListQuery> for PatientDirectoryQuery {
    fn from(query: PatientListQuery) -> Self {
        Self {
            search: query.search,
            status: query.status,
            sort: query.sort.unwrap_or_default(),
            direction: query.direction.unwrap_or_default(),
        }
    }
}

/// Filtered patient directory.
#[utoipa::path(
    get,
    path = "/api/v1/patients",
    params(PatientListQuery),
    responses(
        (status = 200, description = "Patients", body = [PatientSummary]),
        (status = 400, description = "Unknown status, sort or direction", body = Error),
        (status = 401, description = "Sign-in required; details.redirect names the login view", body = Error),
        (status = 503, description = "Practice data unavailable", body = Error)
    ),
    tags = ["practice"],
    operation_id = "listPatients"
)]
#[get("/patients")]
pub async fn list_patients(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PatientListQuery>,
) -> ApiResult<web::Json<Vec<PatientSummary>>> {
    session.require(View::Dashboard)?;
    let query = PatientDirectoryQuery::from(query.into_inner());
    state.practice.patients(&query).await.map(web::Json)
}

/// Full record for one patient.
#[utoipa::path(
    get,
    path = "/api/v1/patients/{patient_id}",
    params(("patient_id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Patient record", body = PatientRecord),
        (status = 401, description = "Sign-in required; details.redirect names the login view", body = Error),
        (status = 404, description = "Unknown patient", body = Error),
        (status = 503, description = "Practice data unavailable", body = Error)
    ),
    tags = ["practice"],
    operation_id = "patientRecord"
)]
#[get("/patients/{patient_id}")]
pub async fn patient_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PatientRecord>> {
    session.require(View::PatientDetail)?;
    state
        .practice
        .patient_record(&path.into_inner())
        .await
        .map(web::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn absent_filters_fall_back_to_name_ascending() {
        let query = PatientDirectoryQuery::from(PatientListQuery::default());

        assert_eq!(query, PatientDirectoryQuery::default());
        assert_eq!(query.sort, PatientSortField::Name);
        assert_eq!(query.direction, SortDirection::Asc);
    }

    #[rstest]
    fn query_string_values_use_wire_names() {
        let parsed: PatientListQuery = serde_json::from_value(serde_json::json!({
            "status": "completed",
            "sort": "lastVisit",
            "direction": "desc"
        }))
        .expect("query parses");

        let query = PatientDirectoryQuery::from(parsed);

        assert_eq!(query.status, Some(PatientStatus::Completed));
        assert_eq!(query.sort, PatientSortField::LastVisit);
        assert_eq!(query.direction, SortDirection::Desc);
    }
}
