use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::article::Article;

/// Unique identifier for an author, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorId(pub Uuid);

impl AuthorId {
    /// Create a new AuthorId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AuthorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AuthorId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// An author: the only principal that can log in.
///
/// The password field always holds a one-way digest once the record has gone
/// through `AuthorService::create_author`. It is never serialized back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    /// Login lookup key. Not enforced unique.
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Articles whose `author_id` points here. Populated on single reads only.
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Signup payload. Missing fields deserialize as empty strings so that
/// validation, not the JSON decoder, reports them.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateAuthorRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for CreateAuthorRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateAuthorRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Full replacement of an author's mutable fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateAuthorRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Login payload.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Structural email check: exactly one `@`, non-empty local part, and a
/// domain part with no whitespace.
///
/// # Examples
///
/// ```
/// use modart_types::author::is_valid_email;
///
/// assert!(is_valid_email("ada@x.io"));
/// assert!(!is_valid_email("ada"));
/// assert!(!is_valid_email("@x.io"));
/// assert!(!is_valid_email("ada@"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_id_display() {
        let id = AuthorId::new();
        let parsed: AuthorId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_author_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<AuthorId>().is_err());
    }

    #[test]
    fn test_password_never_serialized() {
        let author = Author {
            id: AuthorId::new(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.io".to_string(),
            password: "$argon2id$v=19$digest".to_string(),
            articles: Vec::new(),
        };
        let json = serde_json::to_value(&author).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "ada@x.io");
    }

    #[test]
    fn test_create_request_missing_fields_default_empty() {
        let req: CreateAuthorRequest =
            serde_json::from_str(r#"{"first_name":"Ada"}"#).unwrap();
        assert_eq!(req.first_name, "Ada");
        assert!(req.email.is_empty());
        assert!(req.password.is_empty());
    }

    #[test]
    fn test_request_debug_redacts_password() {
        let req = LoginRequest {
            email: "ada@x.io".to_string(),
            password: "secret".to_string(),
        };
        let debug = format!("{req:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("ada@x.io"));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("ada@x.io"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@b@c"));
        assert!(!is_valid_email("ada lovelace@x.io"));
    }
}
