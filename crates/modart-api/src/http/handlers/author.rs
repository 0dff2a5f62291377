//! Author handlers: signup, login and CRUD under `/api/v1/users`.

use std::time::Instant;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use modart_types::author::{
    Author, AuthorId, CreateAuthorRequest, LoginRequest, UpdateAuthorRequest,
};
use modart_types::error::AuthorError;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::http::session::session_cookie;
use crate::state::AppState;

/// Parse a path id; an unparsable id behaves like an unknown one.
fn parse_id(raw: &str, miss: AuthorError) -> Result<AuthorId, AppError> {
    raw.parse().map_err(|_| AppError::Author(miss))
}

/// POST /api/v1/users/signup - Register a new author.
pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<CreateAuthorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Author>>), AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();
    let Json(body) = body?;

    let author = state.author_service.create_author(body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let link = format!("/api/v1/users/{}", author.id);
    let resp = ApiResponse::success(author, request_id, elapsed).with_link("self", &link);

    Ok((StatusCode::CREATED, Json(resp)))
}

/// POST /api/v1/users/login - Authenticate and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();
    let Json(body) = body?;

    let author = state
        .author_service
        .login_author(body)
        .await
        .map_err(|e| match e {
            AuthorError::NotFound | AuthorError::InvalidCredentials => AppError::LoginFailed,
            other => AppError::Author(other),
        })?;

    let session = state.token_issuer.issue(&author.email)?;
    let cookie = session_cookie(&session.token, state.cookie_max_age_secs);
    let expires_at = chrono::DateTime::from_timestamp(session.claims.exp, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default();
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"message": "login successful", "expires_at": expires_at}),
        request_id,
        elapsed,
    );

    Ok(([(header::SET_COOKIE, cookie.to_string())], Json(resp)))
}

/// GET /api/v1/users - List all authors.
pub async fn list_authors(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Author>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let authors = state.author_service.read_authors().await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(authors, request_id, elapsed).with_link("self", "/api/v1/users");

    Ok(Json(resp))
}

/// GET /api/v1/users/{id} - Get an author with their articles.
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Author>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let id = parse_id(&id, AuthorError::NotFound)?;
    let author = state.author_service.read_author(&id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let link = format!("/api/v1/users/{}", author.id);
    let resp = ApiResponse::success(author, request_id, elapsed).with_link("self", &link);

    Ok(Json(resp))
}

/// PUT /api/v1/users/{id} - Replace an author's profile fields.
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateAuthorRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Author>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();
    let Json(body) = body?;

    let id = parse_id(&id, AuthorError::NotUpdated)?;
    let author = state.author_service.update_author(&id, body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let link = format!("/api/v1/users/{}", author.id);
    let resp = ApiResponse::success(author, request_id, elapsed).with_link("self", &link);

    Ok(Json(resp))
}

/// DELETE /api/v1/users/{id} - Delete an author permanently.
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let id = parse_id(&id, AuthorError::NotDeleted)?;
    state.author_service.delete_author(&id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"deleted": true, "id": id.to_string()}),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}
