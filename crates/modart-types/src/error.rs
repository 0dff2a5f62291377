use thiserror::Error;

use crate::entity::EntityKind;

/// Errors from repository operations (used by trait definitions in modart-core).
///
/// Absence on read is not an error: repositories return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("{0} not created")]
    NotCreated(EntityKind),

    #[error("{0} not updated")]
    NotUpdated(EntityKind),

    #[error("{0} not deleted")]
    NotDeleted(EntityKind),
}

/// Errors from the credential module.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Transform(String),
}

/// Errors from session token issuance and verification.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Errors related to author operations.
#[derive(Debug, Error)]
pub enum AuthorError {
    #[error("author not found")]
    NotFound,

    #[error("invalid author: {0}")]
    InvalidInput(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("author not created")]
    NotCreated,

    #[error("author not updated")]
    NotUpdated,

    #[error("author not deleted")]
    NotDeleted,

    #[error("password transform failed: {0}")]
    TransformError(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl From<RepositoryError> for AuthorError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotCreated(_) => AuthorError::NotCreated,
            RepositoryError::NotUpdated(_) => AuthorError::NotUpdated,
            RepositoryError::NotDeleted(_) => AuthorError::NotDeleted,
            other => AuthorError::StorageError(other.to_string()),
        }
    }
}

/// Errors related to article operations.
#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("article not found")]
    NotFound,

    #[error("invalid article: {0}")]
    InvalidInput(String),

    #[error("article not created")]
    NotCreated,

    #[error("article not updated")]
    NotUpdated,

    #[error("article not deleted")]
    NotDeleted,

    #[error("storage error: {0}")]
    StorageError(String),
}

impl From<RepositoryError> for ArticleError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotCreated(_) => ArticleError::NotCreated,
            RepositoryError::NotUpdated(_) => ArticleError::NotUpdated,
            RepositoryError::NotDeleted(_) => ArticleError::NotDeleted,
            other => ArticleError::StorageError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::NotUpdated(EntityKind::Article);
        assert_eq!(err.to_string(), "article not updated");
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_author_error_from_repository() {
        assert!(matches!(
            AuthorError::from(RepositoryError::NotDeleted(EntityKind::Author)),
            AuthorError::NotDeleted
        ));
        assert!(matches!(
            AuthorError::from(RepositoryError::Connection("refused".to_string())),
            AuthorError::StorageError(_)
        ));
    }

    #[test]
    fn test_article_error_from_repository() {
        assert!(matches!(
            ArticleError::from(RepositoryError::NotCreated(EntityKind::Article)),
            ArticleError::NotCreated
        ));
    }

    #[test]
    fn test_credentials_error_is_generic() {
        // Same message whether the email or the password was wrong.
        assert_eq!(
            AuthorError::InvalidCredentials.to_string(),
            "invalid email or password"
        );
    }
}
