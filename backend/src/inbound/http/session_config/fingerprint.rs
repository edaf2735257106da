//! Session key fingerprint for startup logs.
//!
//! Operators compare fingerprints across replicas to confirm they share a
//! key without the key itself ever reaching a log line.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// First eight bytes of the SHA-256 of the signing half, hex encoded.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use careandcure::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_material_gives_same_fingerprint() {
        let material = [7_u8; 64];
        assert_eq!(
            key_fingerprint(&Key::derive_from(&material)),
            key_fingerprint(&Key::derive_from(&material))
        );
    }

    #[test]
    fn different_keys_differ() {
        assert_ne!(
            key_fingerprint(&Key::derive_from(&[1_u8; 64])),
            key_fingerprint(&Key::derive_from(&[2_u8; 64]))
        );
    }
}
