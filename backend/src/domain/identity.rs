//! Authenticated practitioner identity.
//!
//! An [`Identity`] is fabricated by the credential gateway on a successful
//! sign-in or registration and then held exclusively by the session store.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the identity constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityValidationError {
    /// Identifier was missing or blank once trimmed.
    EmptyId,
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Display name was missing or blank once trimmed.
    EmptyName,
}

impl fmt::Display for IdentityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "identity id must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyName => write!(f, "name must not be empty"),
        }
    }
}

impl std::error::Error for IdentityValidationError {}

fn non_blank(
    value: impl Into<String>,
    error: IdentityValidationError,
) -> Result<String, IdentityValidationError> {
    let raw = value.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    if trimmed.len() == raw.len() {
        Ok(raw)
    } else {
        Ok(trimmed.to_owned())
    }
}

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident, $error:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(try_from = "String", into = "String")]
        #[schema(value_type = String)]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the value, trimming surrounding whitespace.
            pub fn new(value: impl Into<String>) -> Result<Self, IdentityValidationError> {
                non_blank(value, $error).map(Self)
            }

            /// Borrow the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentityValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

string_newtype!(
    /// Opaque identity identifier. Legacy sessions use short numeric ids, so
    /// only non-emptiness is enforced.
    IdentityId,
    IdentityValidationError::EmptyId
);

string_newtype!(
    /// Email address the practitioner signed in with. Format is not
    /// validated here; that is the credential service's concern.
    EmailAddress,
    IdentityValidationError::EmptyEmail
);

string_newtype!(
    /// Name shown in the header and on the dashboard greeting.
    DisplayName,
    IdentityValidationError::EmptyName
);

impl IdentityId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Role held by the practitioner.
///
/// Roles are recorded but not consulted by any access decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Treating practitioner.
    #[default]
    #[serde(alias = "doctor")]
    Practitioner,
    /// Practice administrator.
    #[serde(alias = "admin")]
    Administrator,
}

/// Authenticated practitioner profile held for the session.
///
/// ## Invariants
/// - `id` and `email` are non-empty once trimmed.
/// - `profile_image` and `specialization`, when present, are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    id: IdentityId,
    name: DisplayName,
    email: EmailAddress,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "https://images.example.com/dr-doe.jpeg")]
    profile_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Homeopathic Physician")]
    specialization: Option<String>,
}

impl Identity {
    /// Build an identity with no profile image or specialization.
    ///
    /// # Examples
    /// ```
    /// use careandcure::domain::{DisplayName, EmailAddress, Identity, IdentityId, Role};
    ///
    /// let identity = Identity::new(
    ///     IdentityId::new("1").expect("id"),
    ///     DisplayName::new("Dr. New").expect("name"),
    ///     EmailAddress::new("new@doc.com").expect("email"),
    ///     Role::Practitioner,
    /// );
    /// assert_eq!(identity.email().as_str(), "new@doc.com");
    /// assert!(identity.profile_image().is_none());
    /// ```
    #[must_use]
    pub fn new(id: IdentityId, name: DisplayName, email: EmailAddress, role: Role) -> Self {
        Self {
            id,
            name,
            email,
            role,
            profile_image: None,
            specialization: None,
        }
    }

    /// Attach a profile image reference; blank values clear it.
    #[must_use]
    pub fn with_profile_image(mut self, image: impl Into<String>) -> Self {
        self.profile_image = present(image.into());
        self
    }

    /// Attach a specialization; blank values clear it.
    #[must_use]
    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = present(specialization.into());
        self
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &IdentityId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Sign-in email.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Recorded role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Profile image reference, if any.
    #[must_use]
    pub fn profile_image(&self) -> Option<&str> {
        self.profile_image.as_deref()
    }

    /// Specialization text, if any.
    #[must_use]
    pub fn specialization(&self) -> Option<&str> {
        self.specialization.as_deref()
    }
}

fn present(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for identity invariants.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", IdentityValidationError::EmptyId)]
    #[case("   ", IdentityValidationError::EmptyId)]
    fn blank_ids_are_rejected(#[case] raw: &str, #[case] expected: IdentityValidationError) {
        assert_eq!(IdentityId::new(raw), Err(expected));
    }

    #[test]
    fn values_are_trimmed() {
        let email = EmailAddress::new("  a@b.com ").expect("valid email");
        assert_eq!(email.as_str(), "a@b.com");
    }

    #[test]
    fn blank_email_is_rejected() {
        assert_eq!(
            EmailAddress::new("\t"),
            Err(IdentityValidationError::EmptyEmail)
        );
    }

    #[test]
    fn random_ids_are_distinct() {
        assert_ne!(IdentityId::random(), IdentityId::random());
    }

    #[rstest]
    #[case("\"doctor\"", Role::Practitioner)]
    #[case("\"practitioner\"", Role::Practitioner)]
    #[case("\"admin\"", Role::Administrator)]
    #[case("\"administrator\"", Role::Administrator)]
    fn role_accepts_legacy_names(#[case] raw: &str, #[case] expected: Role) {
        let role: Role = serde_json::from_str(raw).expect("role parses");
        assert_eq!(role, expected);
    }

    #[test]
    fn blank_optional_fields_are_absent() {
        let identity = Identity::new(
            IdentityId::new("1").expect("id"),
            DisplayName::new("Dr. Blank").expect("name"),
            EmailAddress::new("blank@doc.com").expect("email"),
            Role::Practitioner,
        )
        .with_specialization("")
        .with_profile_image("  ");

        assert!(identity.specialization().is_none());
        assert!(identity.profile_image().is_none());
    }
}
