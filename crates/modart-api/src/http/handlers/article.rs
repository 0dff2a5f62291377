//! Article CRUD handlers under `/api/v1/articles`.

use std::time::Instant;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use modart_types::article::{Article, ArticleId, CreateArticleRequest, UpdateArticleRequest};
use modart_types::error::ArticleError;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

fn parse_id(raw: &str, miss: ArticleError) -> Result<ArticleId, AppError> {
    raw.parse().map_err(|_| AppError::Article(miss))
}

/// POST /api/v1/articles - Create an article.
pub async fn create_article(
    State(state): State<AppState>,
    body: Result<Json<CreateArticleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Article>>), AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();
    let Json(body) = body?;

    let article = state.article_service.create_article(body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let link = format!("/api/v1/articles/{}", article.id);
    let author_link = format!("/api/v1/users/{}", article.author_id);
    let resp = ApiResponse::success(article, request_id, elapsed)
        .with_link("self", &link)
        .with_link("author", &author_link);

    Ok((StatusCode::CREATED, Json(resp)))
}

/// GET /api/v1/articles - List all articles.
pub async fn list_articles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Article>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let articles = state.article_service.read_articles().await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp =
        ApiResponse::success(articles, request_id, elapsed).with_link("self", "/api/v1/articles");

    Ok(Json(resp))
}

/// GET /api/v1/articles/{id} - Get an article.
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Article>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let id = parse_id(&id, ArticleError::NotFound)?;
    let article = state.article_service.read_article(&id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let link = format!("/api/v1/articles/{}", article.id);
    let resp = ApiResponse::success(article, request_id, elapsed).with_link("self", &link);

    Ok(Json(resp))
}

/// PUT /api/v1/articles/{id} - Replace an article's mutable fields.
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateArticleRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Article>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();
    let Json(body) = body?;

    let id = parse_id(&id, ArticleError::NotUpdated)?;
    let article = state.article_service.update_article(&id, body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let link = format!("/api/v1/articles/{}", article.id);
    let resp = ApiResponse::success(article, request_id, elapsed).with_link("self", &link);

    Ok(Json(resp))
}

/// DELETE /api/v1/articles/{id} - Delete an article.
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let id = parse_id(&id, ArticleError::NotDeleted)?;
    state.article_service.delete_article(&id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"deleted": true, "id": id.to_string()}),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}
