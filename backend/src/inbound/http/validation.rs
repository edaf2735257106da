//! Shared validation helpers for inbound HTTP adapters.
//!
//! Form validation failures carry the offending field so the client can
//! highlight it; extractor failures are converted into the same error shape.

use actix_web::{HttpRequest, error::JsonPayloadError, error::QueryPayloadError, web};
use serde_json::json;

use crate::domain::{Error, LoginValidationError, RegistrationValidationError};

/// Machine-readable validation codes placed in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    EmptyField,
    PasswordMismatch,
    TermsNotAccepted,
    MalformedBody,
    MalformedQuery,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyField => "empty_field",
            Self::PasswordMismatch => "password_mismatch",
            Self::TermsNotAccepted => "terms_not_accepted",
            Self::MalformedBody => "malformed_body",
            Self::MalformedQuery => "malformed_query",
        }
    }
}

fn field_error(field: &str, message: impl Into<String>, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

/// Map a rejected sign-in form.
pub(crate) fn login_validation_error(err: &LoginValidationError) -> Error {
    field_error(err.field(), err.to_string(), ValidationCode::EmptyField)
}

/// Map a rejected registration form.
pub(crate) fn registration_validation_error(err: &RegistrationValidationError) -> Error {
    let code = match err {
        RegistrationValidationError::PasswordMismatch => ValidationCode::PasswordMismatch,
        RegistrationValidationError::TermsNotAccepted => ValidationCode::TermsNotAccepted,
        RegistrationValidationError::EmptyName
        | RegistrationValidationError::EmptyEmail
        | RegistrationValidationError::EmptyPassword => ValidationCode::EmptyField,
    };
    field_error(err.field(), err.to_string(), code)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid request body: {err}"))
        .with_details(json!({ "code": ValidationCode::MalformedBody.as_str() }))
        .into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}"))
        .with_details(json!({ "code": ValidationCode::MalformedQuery.as_str() }))
        .into()
}

/// JSON extractor configuration emitting domain errors.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Query extractor configuration emitting domain errors.
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RegistrationValidationError::EmptyName, "name", "empty_field")]
    #[case(
        RegistrationValidationError::PasswordMismatch,
        "confirmPassword",
        "password_mismatch"
    )]
    #[case(
        RegistrationValidationError::TermsNotAccepted,
        "acceptTerms",
        "terms_not_accepted"
    )]
    fn registration_errors_name_the_field(
        #[case] err: RegistrationValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mapped = registration_validation_error(&err);

        assert_eq!(mapped.message(), err.to_string());
        assert_eq!(
            mapped.details(),
            Some(&json!({ "field": field, "code": code }))
        );
    }

    #[rstest]
    fn login_errors_name_the_field() {
        let mapped = login_validation_error(&LoginValidationError::EmptyPassword);

        assert_eq!(mapped.message(), "password must not be empty");
        assert_eq!(
            mapped.details().and_then(|d| d["field"].as_str()),
            Some("password")
        );
    }
}
