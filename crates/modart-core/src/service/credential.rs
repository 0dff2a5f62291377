//! PasswordHasher trait for one-way password digests.
//!
//! Defined in modart-core so services can hash and verify credentials without
//! coupling to a specific algorithm. The `Argon2PasswordHasher` adapter lives
//! in modart-infra.

use modart_types::error::CredentialError;

/// Abstraction over salted, deliberately slow password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Produce a self-describing digest of `plaintext` with a fresh salt.
    ///
    /// Fails only when the underlying transform fails.
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError>;

    /// Check `plaintext` against a digest produced by [`PasswordHasher::hash`].
    ///
    /// A mismatch or a malformed digest yields `Ok(false)`.
    fn verify(&self, digest: &str, plaintext: &str) -> Result<bool, CredentialError>;
}
