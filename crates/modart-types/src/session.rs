//! Session token types issued on successful login.

use serde::{Deserialize, Serialize};

/// Lifetime of a signed session token, in seconds (60 minutes).
pub const SESSION_TTL_SECS: i64 = 60 * 60;

/// Name of the cookie that carries the session token.
pub const SESSION_COOKIE_NAME: &str = "Authorization";

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the authenticated author's email.
    pub sub: String,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Absolute expiry, Unix seconds.
    pub exp: i64,
}

impl SessionClaims {
    /// Claims for `subject` issued at `issued_at`, expiring `SESSION_TTL_SECS` later.
    pub fn new(subject: impl Into<String>, issued_at: i64) -> Self {
        Self {
            sub: subject.into(),
            iat: issued_at,
            exp: issued_at + SESSION_TTL_SECS,
        }
    }
}

/// A signed token together with the claims it encodes.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub claims: SessionClaims,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_expire_one_hour_after_issue() {
        let claims = SessionClaims::new("ada@x.io", 1_700_000_000);
        assert_eq!(claims.sub, "ada@x.io");
        assert_eq!(claims.exp - claims.iat, 3600);
    }
}
