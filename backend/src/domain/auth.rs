//! Authentication inputs: sign-in credentials and registration details.
//!
//! Inbound adapters validate raw form values through these constructors before
//! the session store is ever invoked. A rejected form never starts a
//! transition.

use std::fmt;

use zeroize::Zeroizing;

use super::{DisplayName, EmailAddress};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl LoginValidationError {
    /// Name of the form field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "email",
            Self::EmptyPassword => "password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials passed to the credential gateway.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace.
///
/// # Examples
/// ```
/// use careandcure::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" a@b.com ", "pw").expect("valid");
/// assert_eq!(creds.email().as_str(), "a@b.com");
/// assert_eq!(creds.password(), "pw");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(|_| LoginValidationError::EmptyEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email the practitioner signs in with.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when a registration form is rejected.
///
/// Mismatched passwords and unaccepted terms carry the exact wording shown
/// beneath the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// Password and confirmation differ.
    PasswordMismatch,
    /// The terms and conditions checkbox was left unticked.
    TermsNotAccepted,
}

impl RegistrationValidationError {
    /// Name of the form field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyEmail => "email",
            Self::EmptyPassword => "password",
            Self::PasswordMismatch => "confirmPassword",
            Self::TermsNotAccepted => "acceptTerms",
        }
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordMismatch => write!(f, "Passwords do not match."),
            Self::TermsNotAccepted => write!(f, "You must agree to the terms and conditions."),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Raw registration form values as submitted.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationForm<'a> {
    /// Full name entered by the practitioner.
    pub name: &'a str,
    /// Email address.
    pub email: &'a str,
    /// Chosen password.
    pub password: &'a str,
    /// Confirmation of the chosen password.
    pub confirm_password: &'a str,
    /// Whether the terms and conditions were accepted.
    pub accept_terms: bool,
}

/// Validated registration details passed to the credential gateway.
///
/// # Examples
/// ```
/// use careandcure::domain::{RegistrationDetails, RegistrationForm, RegistrationValidationError};
///
/// let form = RegistrationForm {
///     name: "Dr. New",
///     email: "new@doc.com",
///     password: "secret1",
///     confirm_password: "secret2",
///     accept_terms: true,
/// };
/// let err = RegistrationDetails::try_from_form(form).expect_err("mismatch");
/// assert_eq!(err, RegistrationValidationError::PasswordMismatch);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDetails {
    name: DisplayName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl RegistrationDetails {
    /// Validate a submitted registration form.
    ///
    /// Blank fields are reported first, then the password confirmation, then
    /// the terms checkbox.
    pub fn try_from_form(form: RegistrationForm<'_>) -> Result<Self, RegistrationValidationError> {
        let name =
            DisplayName::new(form.name).map_err(|_| RegistrationValidationError::EmptyName)?;
        let email =
            EmailAddress::new(form.email).map_err(|_| RegistrationValidationError::EmptyEmail)?;
        if form.password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        if form.password != form.confirm_password {
            return Err(RegistrationValidationError::PasswordMismatch);
        }
        if !form.accept_terms {
            return Err(RegistrationValidationError::TermsNotAccepted);
        }

        Ok(Self {
            name,
            email,
            password: Zeroizing::new(form.password.to_owned()),
        })
    }

    /// Build details directly, bypassing the confirmation and terms checks.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Self, RegistrationValidationError> {
        Self::try_from_form(RegistrationForm {
            name,
            email,
            password,
            confirm_password: password,
            accept_terms: true,
        })
    }

    /// Name the new account is registered under.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Email the new account signs in with.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Chosen password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("a@b.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  a@b.com  ", "pw")]
    #[case("x@y.com", " padded password ")]
    fn valid_credentials_trim_email(#[case] email: &str, #[case] password: &str) {
        let creds =
            LoginCredentials::try_from_parts(email, password).expect("valid inputs should succeed");
        assert_eq!(creds.email().as_str(), email.trim());
        assert_eq!(creds.password(), password);
    }

    fn form<'a>(
        name: &'a str,
        password: &'a str,
        confirm: &'a str,
        accept: bool,
    ) -> RegistrationForm<'a> {
        RegistrationForm {
            name,
            email: "new@doc.com",
            password,
            confirm_password: confirm,
            accept_terms: accept,
        }
    }

    #[rstest]
    #[case(form(" ", "secret1", "secret1", true), RegistrationValidationError::EmptyName)]
    #[case(form("Dr. New", "", "", true), RegistrationValidationError::EmptyPassword)]
    #[case(
        form("Dr. New", "secret1", "secret2", true),
        RegistrationValidationError::PasswordMismatch
    )]
    #[case(
        form("Dr. New", "secret1", "secret1", false),
        RegistrationValidationError::TermsNotAccepted
    )]
    #[case(
        form("Dr. New", "secret1", "other", false),
        RegistrationValidationError::PasswordMismatch
    )]
    fn rejected_registration_forms(
        #[case] input: RegistrationForm<'_>,
        #[case] expected: RegistrationValidationError,
    ) {
        let err = RegistrationDetails::try_from_form(input).expect_err("form must be rejected");
        assert_eq!(err, expected);
    }

    #[test]
    fn mismatch_and_terms_messages_match_form_wording() {
        assert_eq!(
            RegistrationValidationError::PasswordMismatch.to_string(),
            "Passwords do not match."
        );
        assert_eq!(
            RegistrationValidationError::TermsNotAccepted.to_string(),
            "You must agree to the terms and conditions."
        );
        assert_eq!(
            RegistrationValidationError::PasswordMismatch.field(),
            "confirmPassword"
        );
    }

    #[test]
    fn accepted_registration_keeps_name_and_email() {
        let details = RegistrationDetails::try_from_parts("new@doc.com", "secret1", "Dr. New")
            .expect("valid registration");
        assert_eq!(details.name().as_str(), "Dr. New");
        assert_eq!(details.email().as_str(), "new@doc.com");
        assert_eq!(details.password(), "secret1");
    }
}
