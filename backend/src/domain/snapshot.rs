//! Versioned encoding of the identity snapshot kept in durable storage.
//!
//! Records are flat JSON objects under [`SNAPSHOT_KEY`]. Version 1 adds an
//! explicit `version` tag; untagged records are treated as version 0 and carry
//! the same fields, so sessions saved before the tag existed still restore.

use serde::{Deserialize, Serialize};

use super::{DisplayName, EmailAddress, Identity, IdentityId, IdentityValidationError, Role};

/// Storage key holding the serialized identity.
pub const SNAPSHOT_KEY: &str = "user";

/// Snapshot version written by [`encode`].
pub const SNAPSHOT_VERSION: u32 = 1;

const LEGACY_VERSION: u32 = 0;

/// Why a stored snapshot could not be turned back into an identity.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotDecodeError {
    /// The value is not a JSON object with the expected fields.
    #[error("snapshot is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The record was written by a newer release.
    #[error("snapshot version {0} is not supported")]
    UnsupportedVersion(u32),
    /// The id or email is blank.
    #[error("snapshot violates identity invariants: {0}")]
    Invalid(#[from] IdentityValidationError),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredIdentity {
    #[serde(default = "legacy_version")]
    version: u32,
    id: String,
    name: String,
    email: String,
    #[serde(default)]
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    specialization: Option<String>,
}

fn legacy_version() -> u32 {
    LEGACY_VERSION
}

/// Serialize an identity as a current-version snapshot.
///
/// # Examples
/// ```
/// use careandcure::domain::snapshot::{decode, encode};
/// use careandcure::domain::{DisplayName, EmailAddress, Identity, IdentityId, Role};
///
/// let identity = Identity::new(
///     IdentityId::new("7").expect("id"),
///     DisplayName::new("Dr. Doe").expect("name"),
///     EmailAddress::new("doe@doc.com").expect("email"),
///     Role::Practitioner,
/// );
/// let raw = encode(&identity).expect("encode");
/// assert_eq!(decode(&raw).expect("decode"), identity);
/// ```
pub fn encode(identity: &Identity) -> Result<String, serde_json::Error> {
    serde_json::to_string(&StoredIdentity {
        version: SNAPSHOT_VERSION,
        id: identity.id().to_string(),
        name: identity.name().to_string(),
        email: identity.email().to_string(),
        role: identity.role(),
        profile_image: identity.profile_image().map(str::to_owned),
        specialization: identity.specialization().map(str::to_owned),
    })
}

/// Parse a stored snapshot of any supported version.
pub fn decode(raw: &str) -> Result<Identity, SnapshotDecodeError> {
    let stored: StoredIdentity = serde_json::from_str(raw)?;
    if stored.version > SNAPSHOT_VERSION {
        return Err(SnapshotDecodeError::UnsupportedVersion(stored.version));
    }

    let email = EmailAddress::new(stored.email)?;
    // Older records may carry an empty name; the email stands in for it.
    let name = DisplayName::new(stored.name).or_else(|_| DisplayName::new(email.as_str()))?;
    let mut identity = Identity::new(IdentityId::new(stored.id)?, name, email, stored.role);
    if let Some(image) = stored.profile_image {
        identity = identity.with_profile_image(image);
    }
    if let Some(specialization) = stored.specialization {
        identity = identity.with_specialization(specialization);
    }
    Ok(identity)
}
