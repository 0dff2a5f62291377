//! HS256 JWT session tokens.
//!
//! Implements `TokenIssuer` from `modart-core` with `jsonwebtoken`. The
//! signing secret comes from `MODART_SECRET`, or `SECRET` when that is unset,
//! and is only exposed while building keys.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};

use modart_core::service::session::TokenIssuer;
use modart_types::error::TokenError;
use modart_types::session::{SessionClaims, SessionToken};

/// Environment variables consulted for the signing secret, in order.
pub const SECRET_ENV_VARS: &[&str] = &["MODART_SECRET", "SECRET"];

pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenIssuer {
    /// Build an issuer from a signing secret. An empty secret is rejected.
    pub fn new(secret: &SecretString) -> Result<Self, TokenError> {
        let bytes = secret.expose_secret().as_bytes();
        if bytes.is_empty() {
            return Err(TokenError::Signing("signing secret is empty".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            validation,
        })
    }

    /// Read the secret from the first of [`SECRET_ENV_VARS`] that is set.
    pub fn from_env() -> Result<Self, TokenError> {
        let secret = SECRET_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                TokenError::Signing(format!(
                    "no signing secret: set {}",
                    SECRET_ENV_VARS.join(" or ")
                ))
            })?;
        Self::new(&SecretString::from(secret))
    }

    fn sign(&self, claims: SessionClaims) -> Result<SessionToken, TokenError> {
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        Ok(SessionToken { token, claims })
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, subject: &str) -> Result<SessionToken, TokenError> {
        self.sign(SessionClaims::new(subject, Utc::now().timestamp()))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(secret: &str) -> JwtTokenIssuer {
        JwtTokenIssuer::new(&SecretString::from(secret.to_string())).unwrap()
    }

    #[test]
    fn test_issue_then_verify() {
        let issuer = issuer("test-signing-secret");
        let token = issuer.issue("ada@x.io").unwrap();

        let claims = issuer.verify(&token.token).unwrap();
        assert_eq!(claims, token.claims);
        assert_eq!(claims.sub, "ada@x.io");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_header_is_hs256() {
        let token = issuer("test-signing-secret").issue("ada@x.io").unwrap();
        let header = jsonwebtoken::decode_header(&token.token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let token = issuer("one").issue("ada@x.io").unwrap();
        let err = issuer("two").verify(&token.token).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let issuer = issuer("test-signing-secret");
        let stale = issuer
            .sign(SessionClaims::new("ada@x.io", Utc::now().timestamp() - 7200))
            .unwrap();
        assert!(issuer.verify(&stale.token).is_err());
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let result = JwtTokenIssuer::new(&SecretString::from(String::new()));
        assert!(matches!(result, Err(TokenError::Signing(_))));
    }
}
