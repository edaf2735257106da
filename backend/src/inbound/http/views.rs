//! Navigation guard endpoint.
//!
//! ```text
//! GET /api/v1/views?path=/patients/3
//! ```
//!
//! The client asks before rendering a screen; the answer says whether to
//! render it, wait, or go to the sign-in view.

use std::collections::BTreeMap;

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Access, Error, LOGIN_PATH, RouteDecision, View};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;

/// Query for `GET /views`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ViewQuery {
    /// Concrete client path, e.g. `/patients/3`.
    pub path: String,
}

/// Guard verdict for one navigation.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewEvaluation {
    /// Matched screen.
    pub view: View,
    /// Its access requirement.
    pub access: Access,
    /// What the client should do.
    pub decision: RouteDecision,
    /// Where to navigate instead; set only for redirects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Captured path parameters.
    pub params: BTreeMap<String, String>,
}

/// Evaluate the guard for a client path.
#[utoipa::path(
    get,
    path = "/api/v1/views",
    params(ViewQuery),
    responses(
        (status = 200, description = "Guard verdict", body = ViewEvaluation),
        (status = 400, description = "Missing path", body = Error),
        (status = 404, description = "No view matches the path", body = Error)
    ),
    tags = ["views"],
    operation_id = "evaluateView",
    security([])
)]
#[get("/views")]
pub async fn evaluate_view(
    session: SessionContext,
    query: web::Query<ViewQuery>,
) -> ApiResult<web::Json<ViewEvaluation>> {
    let guard = session.guard();
    let resolved = guard
        .resolve(&query.path)
        .ok_or_else(|| Error::not_found(format!("no view matches {}", query.path)))?;
    let decision = guard.decide(&session.session(), resolved.descriptor.access);
    Ok(web::Json(ViewEvaluation {
        view: resolved.descriptor.view,
        access: resolved.descriptor.access,
        decision,
        location: (decision == RouteDecision::RedirectToLogin).then(|| LOGIN_PATH.to_owned()),
        params: resolved.params,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{test_session_middleware, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case("/", json!({"view": "home", "access": "public", "decision": "render", "params": {}}))]
    #[case(
        "/dashboard",
        json!({
            "view": "dashboard",
            "access": "authenticated",
            "decision": "redirectToLogin",
            "location": "/login",
            "params": {}
        })
    )]
    #[case(
        "/patients/3/",
        json!({
            "view": "patientDetail",
            "access": "authenticated",
            "decision": "redirectToLogin",
            "location": "/login",
            "params": {"patientId": "3"}
        })
    )]
    #[actix_web::test]
    async fn anonymous_visitor_verdicts(#[case] path: &str, #[case] expected: Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .wrap(test_session_middleware())
                .service(evaluate_view),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/views?path={path}"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, expected);
    }

    #[actix_web::test]
    async fn unknown_paths_are_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .wrap(test_session_middleware())
                .service(evaluate_view),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/views?path=/billing")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
