//! TokenIssuer trait for signed session tokens.
//!
//! The services only authenticate a principal; turning that principal into a
//! bearer token is the HTTP adapter's job, through this trait. The JWT
//! implementation lives in modart-infra.

use modart_types::error::TokenError;
use modart_types::session::{SessionClaims, SessionToken};

/// Issues and checks signed, expiring session tokens.
pub trait TokenIssuer: Send + Sync {
    /// Sign a token whose subject is `subject`, valid for
    /// [`SESSION_TTL_SECS`](modart_types::session::SESSION_TTL_SECS).
    fn issue(&self, subject: &str) -> Result<SessionToken, TokenError>;

    /// Check signature and expiry, returning the embedded claims.
    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError>;
}
