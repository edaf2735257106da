//! HTTP inbound adapter exposing the session and practice screens as JSON.

pub mod auth;
pub mod cases;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod patients;
pub mod profile;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod views;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler and the extractor error mapping.
///
/// The caller owns the scope and wraps it with the session middleware, so
/// the server and integration tests mount the same surface.
///
/// # Examples
///
/// ```rust,no_run
/// use actix_web::{App, web};
/// use careandcure::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// # let _ = app;
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .service(auth::login)
        .service(auth::register)
        .service(auth::logout)
        .service(auth::current_session)
        .service(views::evaluate_view)
        .service(content::home)
        .service(content::about)
        .service(dashboard::dashboard)
        .service(patients::list_patients)
        .service(patients::patient_record)
        .service(cases::case_gallery)
        .service(profile::profile);
}
