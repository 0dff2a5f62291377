use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::author::AuthorId;

/// Unique identifier for an article, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleId(pub Uuid);

impl ArticleId {
    /// Create a new ArticleId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ArticleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ArticleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// An article. `author_id` is a plain reference: nothing checks that the
/// author exists, and deleting the author leaves the article in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub author_id: AuthorId,
    pub title: String,
    pub body: String,
    /// Display name, independent of `author_id`.
    pub author: String,
    pub rate: i32,
    /// Unix seconds (UTC). Set once at creation.
    pub created_at: i64,
}

/// Request to create an article. `author_id` is required; everything else
/// defaults to empty so validation can report it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArticleRequest {
    pub author_id: AuthorId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub rate: i32,
}

/// Full replacement of an article's mutable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateArticleRequest {
    pub author_id: AuthorId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub rate: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_id_display() {
        let id = ArticleId::new();
        let parsed: ArticleId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_article_ids_are_time_sortable() {
        let first = ArticleId::new();
        let second = ArticleId::new();
        assert!(first.0 <= second.0);
    }

    #[test]
    fn test_create_request_requires_author_id() {
        let err = serde_json::from_str::<CreateArticleRequest>(r#"{"title":"Hello"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_create_request_defaults() {
        let author_id = AuthorId::new();
        let json = format!(r#"{{"author_id":"{author_id}","title":"Hello"}}"#);
        let req: CreateArticleRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req.author_id, author_id);
        assert_eq!(req.rate, 0);
        assert!(req.body.is_empty());
    }
}
