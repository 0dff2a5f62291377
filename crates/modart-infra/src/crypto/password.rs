//! Argon2id password hashing.
//!
//! Implements `PasswordHasher` from `modart-core`. Digests are PHC strings
//! (`$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`) carrying their own salt
//! and parameters, so verification needs nothing but the stored string.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;

use modart_core::service::credential::PasswordHasher;
use modart_types::error::CredentialError;

/// Argon2id with the OWASP-recommended defaults (19 MiB, 2 passes, 1 lane)
/// and a random 16-byte salt per digest.
#[derive(Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|e| CredentialError::Transform(e.to_string()))
    }

    fn verify(&self, digest: &str, plaintext: &str) -> Result<bool, CredentialError> {
        let Ok(parsed) = PasswordHash::new(digest) else {
            tracing::warn!("stored password digest is not a PHC string");
            return Ok(false);
        };
        Ok(self
            .argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext_and_verifies() {
        let hasher = Argon2PasswordHasher::new();
        let digest = hasher.hash("secret").unwrap();

        assert_ne!(digest, "secret");
        assert!(digest.starts_with("$argon2id$"));
        assert!(hasher.verify(&digest, "secret").unwrap());
        assert!(!hasher.verify(&digest, "Secret").unwrap());
    }

    #[test]
    fn test_same_password_gets_fresh_salt() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("secret").unwrap();
        let second = hasher.hash("secret").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_digest_does_not_verify() {
        let hasher = Argon2PasswordHasher::new();
        assert!(!hasher.verify("secret", "secret").unwrap());
        assert!(!hasher.verify("", "").unwrap());
    }
}
