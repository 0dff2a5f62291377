//! Article management service.

use chrono::Utc;
use modart_types::article::{Article, ArticleId, CreateArticleRequest, UpdateArticleRequest};
use modart_types::error::ArticleError;

use crate::repository::article::ArticleRepository;

/// Service for article CRUD.
///
/// `author_id` is stored as given; whether the author exists is not checked.
pub struct ArticleService<R: ArticleRepository> {
    repo: R,
}

impl<R: ArticleRepository> ArticleService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create an article, stamping its id and creation time. Content fields
    /// are stored as given.
    pub async fn create_article(
        &self,
        request: CreateArticleRequest,
    ) -> Result<Article, ArticleError> {
        let article = Article {
            id: ArticleId::new(),
            author_id: request.author_id,
            title: request.title,
            body: request.body,
            author: request.author,
            rate: request.rate,
            created_at: Utc::now().timestamp(),
        };

        let article = self.repo.create(&article).await?;
        tracing::info!(article_id = %article.id, author_id = %article.author_id, "article created");
        Ok(article)
    }

    pub async fn read_article(&self, id: &ArticleId) -> Result<Article, ArticleError> {
        self.repo.get_by_id(id).await?.ok_or(ArticleError::NotFound)
    }

    pub async fn read_articles(&self) -> Result<Vec<Article>, ArticleError> {
        Ok(self.repo.list().await?)
    }

    /// Replace an article's mutable fields. `created_at` keeps its stored value.
    pub async fn update_article(
        &self,
        id: &ArticleId,
        request: UpdateArticleRequest,
    ) -> Result<Article, ArticleError> {
        let mut article = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(ArticleError::NotUpdated)?;
        article.author_id = request.author_id;
        article.title = request.title;
        article.body = request.body;
        article.author = request.author;
        article.rate = request.rate;

        Ok(self.repo.update(&article).await?)
    }

    pub async fn delete_article(&self, id: &ArticleId) -> Result<(), ArticleError> {
        self.repo.delete(id).await?;
        tracing::info!(article_id = %id, "article deleted");
        Ok(())
    }
}
