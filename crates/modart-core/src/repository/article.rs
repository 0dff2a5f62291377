//! Article repository trait definition.

use modart_types::article::{Article, ArticleId};
use modart_types::author::AuthorId;
use modart_types::error::RepositoryError;

/// Repository trait for article persistence.
///
/// Implementations live in modart-infra (SqliteArticleRepository,
/// KvArticleRepository).
pub trait ArticleRepository: Send + Sync {
    /// Persist a new article. Returns the record as written.
    fn create(
        &self,
        article: &Article,
    ) -> impl std::future::Future<Output = Result<Article, RepositoryError>> + Send;

    /// Get an article by its unique ID.
    fn get_by_id(
        &self,
        id: &ArticleId,
    ) -> impl std::future::Future<Output = Result<Option<Article>, RepositoryError>> + Send;

    /// List every article.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Article>, RepositoryError>> + Send;

    /// List the articles whose `author_id` matches.
    fn list_by_author(
        &self,
        author_id: &AuthorId,
    ) -> impl std::future::Future<Output = Result<Vec<Article>, RepositoryError>> + Send;

    /// Replace the mutable fields of an existing article. `created_at` is
    /// never written.
    fn update(
        &self,
        article: &Article,
    ) -> impl std::future::Future<Output = Result<Article, RepositoryError>> + Send;

    /// Permanently delete an article by ID.
    fn delete(
        &self,
        id: &ArticleId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
