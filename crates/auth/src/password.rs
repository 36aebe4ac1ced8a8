use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand_core::{OsRng, RngCore};
use sha2::Sha512;

use storage::{Salt, SALT_LEN};

use crate::error::{AuthError, Result};

type HmacSha512 = Hmac<Sha512>;

/// Generate a fresh random salt, unique per user.
pub fn generate_salt() -> Salt {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive the stored password digest: HMAC-SHA512 keyed by the salt over the
/// UTF-8 password bytes, base64-encoded.
pub fn hash_password(password: &str, salt: &Salt) -> Result<String> {
    let mut mac = HmacSha512::new_from_slice(salt)
        .map_err(|e| AuthError::HashingError(e.to_string()))?;
    mac.update(password.as_bytes());

    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Verify a password against a stored digest.
///
/// Recomputes the digest and compares the full length in constant time.
/// A malformed stored digest or a length mismatch is a plain `false`, never
/// an error.
pub fn verify_password(password: &str, stored_digest: &str, salt: &Salt) -> bool {
    let Ok(stored) = BASE64.decode(stored_digest) else {
        return false;
    };

    let Ok(mut mac) = HmacSha512::new_from_slice(salt) else {
        return false;
    };
    mac.update(password.as_bytes());

    mac.verify_slice(&stored).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let salt = generate_salt();
        let digest = hash_password("my_secure_password", &salt).unwrap();

        assert!(verify_password("my_secure_password", &digest, &salt));
        assert!(!verify_password("wrong_password", &digest, &salt));
    }

    #[test]
    fn test_hash_is_deterministic_per_salt() {
        let salt = generate_salt();
        let first = hash_password("same_password", &salt).unwrap();
        let second = hash_password("same_password", &salt).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_different_salts_produce_different_digests() {
        let digest1 = hash_password("same_password", &generate_salt()).unwrap();
        let digest2 = hash_password("same_password", &generate_salt()).unwrap();

        assert_ne!(digest1, digest2);
    }

    #[test]
    fn test_malformed_stored_digest_is_false() {
        let salt = generate_salt();

        assert!(!verify_password("anything", "not base64 !!!", &salt));
        assert!(!verify_password("anything", "", &salt));
    }

    #[test]
    fn test_truncated_digest_is_false() {
        let salt = generate_salt();
        let digest = hash_password("password", &salt).unwrap();

        // A prefix of the real digest must not verify.
        let truncated = BASE64.encode(&BASE64.decode(&digest).unwrap()[..32]);
        assert!(!verify_password("password", &truncated, &salt));
    }
}
