//! Application error type mapping to HTTP status codes and envelope format.
//!
//! Store-level failures (including a missed update or delete) are reported
//! as 400; a missing record on read is 404; failures on our side of the
//! password or token transforms are 500.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use modart_types::error::{ArticleError, AuthorError, TokenError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Author(AuthorError),
    Article(ArticleError),
    /// Login rejected. Unknown email and wrong password look the same.
    LoginFailed,
    Token(TokenError),
    /// Malformed request body.
    Validation(String),
}

impl From<AuthorError> for AppError {
    fn from(e: AuthorError) -> Self {
        AppError::Author(e)
    }
}

impl From<ArticleError> for AppError {
    fn from(e: ArticleError) -> Self {
        AppError::Article(e)
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        AppError::Token(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Author(AuthorError::NotFound) => {
                (StatusCode::NOT_FOUND, "AUTHOR_NOT_FOUND", "Author not found".to_string())
            }
            AppError::Author(AuthorError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Author(e @ AuthorError::InvalidCredentials) => {
                (StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS", e.to_string())
            }
            AppError::Author(e @ AuthorError::NotCreated) => {
                (StatusCode::BAD_REQUEST, "NOT_CREATED", e.to_string())
            }
            AppError::Author(e @ AuthorError::NotUpdated) => {
                (StatusCode::BAD_REQUEST, "NOT_UPDATED", e.to_string())
            }
            AppError::Author(e @ AuthorError::NotDeleted) => {
                (StatusCode::BAD_REQUEST, "NOT_DELETED", e.to_string())
            }
            AppError::Author(e @ AuthorError::TransformError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "TRANSFORM_ERROR", e.to_string())
            }
            AppError::Author(e @ AuthorError::StorageError(_)) => {
                (StatusCode::BAD_REQUEST, "STORAGE_ERROR", e.to_string())
            }
            AppError::Article(ArticleError::NotFound) => {
                (StatusCode::NOT_FOUND, "ARTICLE_NOT_FOUND", "Article not found".to_string())
            }
            AppError::Article(ArticleError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Article(e @ ArticleError::NotCreated) => {
                (StatusCode::BAD_REQUEST, "NOT_CREATED", e.to_string())
            }
            AppError::Article(e @ ArticleError::NotUpdated) => {
                (StatusCode::BAD_REQUEST, "NOT_UPDATED", e.to_string())
            }
            AppError::Article(e @ ArticleError::NotDeleted) => {
                (StatusCode::BAD_REQUEST, "NOT_DELETED", e.to_string())
            }
            AppError::Article(e @ ArticleError::StorageError(_)) => {
                (StatusCode::BAD_REQUEST, "STORAGE_ERROR", e.to_string())
            }
            AppError::LoginFailed => (
                StatusCode::BAD_REQUEST,
                "INVALID_CREDENTIALS",
                AuthorError::InvalidCredentials.to_string(),
            ),
            AppError::Token(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "TOKEN_ERROR", e.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(code, error = %message, "request failed");
        } else {
            tracing::debug!(code, error = %message, "request rejected");
        }

        let body = ApiResponse::error(code, &message, uuid::Uuid::now_v7().to_string(), 0);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Author(AuthorError::NotFound), StatusCode::NOT_FOUND),
            (AppError::Article(ArticleError::NotFound), StatusCode::NOT_FOUND),
            (AppError::Author(AuthorError::NotUpdated), StatusCode::BAD_REQUEST),
            (AppError::Article(ArticleError::NotDeleted), StatusCode::BAD_REQUEST),
            (
                AppError::Author(AuthorError::StorageError("down".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Author(AuthorError::TransformError("rng".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Token(TokenError::Signing("no key".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::LoginFailed, StatusCode::BAD_REQUEST),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_login_failure_message_is_generic() {
        let (_, code, message) = AppError::LoginFailed.parts();
        assert_eq!(code, "INVALID_CREDENTIALS");
        assert_eq!(message, "invalid email or password");
    }
}
