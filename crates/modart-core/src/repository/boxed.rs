//! Type-erased repositories for runtime backend selection.
//!
//! Same blanket-impl pattern for both entity families:
//! 1. Define an object-safe `*RepositoryDyn` trait with boxed futures
//! 2. Blanket-impl it for every `T: *Repository`
//! 3. `Box*Repository` wraps `Arc<dyn *RepositoryDyn>`, delegates, and itself
//!    implements the repository trait so services stay generic
//!
//! The backend (relational or key-value) is picked once at startup; the
//! services only ever see these wrappers.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use modart_types::article::{Article, ArticleId};
use modart_types::author::{Author, AuthorId};
use modart_types::error::RepositoryError;

use super::article::ArticleRepository;
use super::author::AuthorRepository;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + Send + 'a>>;

/// Object-safe version of [`AuthorRepository`] with boxed futures.
pub trait AuthorRepositoryDyn: Send + Sync {
    fn create_boxed<'a>(&'a self, author: &'a Author) -> BoxFuture<'a, Author>;
    fn get_by_id_boxed<'a>(&'a self, id: &'a AuthorId) -> BoxFuture<'a, Option<Author>>;
    fn get_by_email_boxed<'a>(&'a self, email: &'a str) -> BoxFuture<'a, Option<Author>>;
    fn list_boxed(&self) -> BoxFuture<'_, Vec<Author>>;
    fn update_boxed<'a>(&'a self, author: &'a Author) -> BoxFuture<'a, Author>;
    fn delete_boxed<'a>(&'a self, id: &'a AuthorId) -> BoxFuture<'a, ()>;
}

impl<T: AuthorRepository> AuthorRepositoryDyn for T {
    fn create_boxed<'a>(&'a self, author: &'a Author) -> BoxFuture<'a, Author> {
        Box::pin(self.create(author))
    }

    fn get_by_id_boxed<'a>(&'a self, id: &'a AuthorId) -> BoxFuture<'a, Option<Author>> {
        Box::pin(self.get_by_id(id))
    }

    fn get_by_email_boxed<'a>(&'a self, email: &'a str) -> BoxFuture<'a, Option<Author>> {
        Box::pin(self.get_by_email(email))
    }

    fn list_boxed(&self) -> BoxFuture<'_, Vec<Author>> {
        Box::pin(self.list())
    }

    fn update_boxed<'a>(&'a self, author: &'a Author) -> BoxFuture<'a, Author> {
        Box::pin(self.update(author))
    }

    fn delete_boxed<'a>(&'a self, id: &'a AuthorId) -> BoxFuture<'a, ()> {
        Box::pin(self.delete(id))
    }
}

/// Type-erased author repository.
#[derive(Clone)]
pub struct BoxAuthorRepository {
    inner: Arc<dyn AuthorRepositoryDyn>,
}

impl BoxAuthorRepository {
    /// Wrap a concrete `AuthorRepository`.
    pub fn new<T: AuthorRepository + 'static>(repo: T) -> Self {
        Self {
            inner: Arc::new(repo),
        }
    }
}

impl AuthorRepository for BoxAuthorRepository {
    async fn create(&self, author: &Author) -> Result<Author, RepositoryError> {
        self.inner.create_boxed(author).await
    }

    async fn get_by_id(&self, id: &AuthorId) -> Result<Option<Author>, RepositoryError> {
        self.inner.get_by_id_boxed(id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Author>, RepositoryError> {
        self.inner.get_by_email_boxed(email).await
    }

    async fn list(&self) -> Result<Vec<Author>, RepositoryError> {
        self.inner.list_boxed().await
    }

    async fn update(&self, author: &Author) -> Result<Author, RepositoryError> {
        self.inner.update_boxed(author).await
    }

    async fn delete(&self, id: &AuthorId) -> Result<(), RepositoryError> {
        self.inner.delete_boxed(id).await
    }
}

/// Object-safe version of [`ArticleRepository`] with boxed futures.
pub trait ArticleRepositoryDyn: Send + Sync {
    fn create_boxed<'a>(&'a self, article: &'a Article) -> BoxFuture<'a, Article>;
    fn get_by_id_boxed<'a>(&'a self, id: &'a ArticleId) -> BoxFuture<'a, Option<Article>>;
    fn list_boxed(&self) -> BoxFuture<'_, Vec<Article>>;
    fn list_by_author_boxed<'a>(&'a self, author_id: &'a AuthorId)
    -> BoxFuture<'a, Vec<Article>>;
    fn update_boxed<'a>(&'a self, article: &'a Article) -> BoxFuture<'a, Article>;
    fn delete_boxed<'a>(&'a self, id: &'a ArticleId) -> BoxFuture<'a, ()>;
}

impl<T: ArticleRepository> ArticleRepositoryDyn for T {
    fn create_boxed<'a>(&'a self, article: &'a Article) -> BoxFuture<'a, Article> {
        Box::pin(self.create(article))
    }

    fn get_by_id_boxed<'a>(&'a self, id: &'a ArticleId) -> BoxFuture<'a, Option<Article>> {
        Box::pin(self.get_by_id(id))
    }

    fn list_boxed(&self) -> BoxFuture<'_, Vec<Article>> {
        Box::pin(self.list())
    }

    fn list_by_author_boxed<'a>(
        &'a self,
        author_id: &'a AuthorId,
    ) -> BoxFuture<'a, Vec<Article>> {
        Box::pin(self.list_by_author(author_id))
    }

    fn update_boxed<'a>(&'a self, article: &'a Article) -> BoxFuture<'a, Article> {
        Box::pin(self.update(article))
    }

    fn delete_boxed<'a>(&'a self, id: &'a ArticleId) -> BoxFuture<'a, ()> {
        Box::pin(self.delete(id))
    }
}

/// Type-erased article repository. Cheap to clone; both services share one.
#[derive(Clone)]
pub struct BoxArticleRepository {
    inner: Arc<dyn ArticleRepositoryDyn>,
}

impl BoxArticleRepository {
    /// Wrap a concrete `ArticleRepository`.
    pub fn new<T: ArticleRepository + 'static>(repo: T) -> Self {
        Self {
            inner: Arc::new(repo),
        }
    }
}

impl ArticleRepository for BoxArticleRepository {
    async fn create(&self, article: &Article) -> Result<Article, RepositoryError> {
        self.inner.create_boxed(article).await
    }

    async fn get_by_id(&self, id: &ArticleId) -> Result<Option<Article>, RepositoryError> {
        self.inner.get_by_id_boxed(id).await
    }

    async fn list(&self) -> Result<Vec<Article>, RepositoryError> {
        self.inner.list_boxed().await
    }

    async fn list_by_author(&self, author_id: &AuthorId) -> Result<Vec<Article>, RepositoryError> {
        self.inner.list_by_author_boxed(author_id).await
    }

    async fn update(&self, article: &Article) -> Result<Article, RepositoryError> {
        self.inner.update_boxed(article).await
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), RepositoryError> {
        self.inner.delete_boxed(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{InMemoryArticleRepository, InMemoryAuthorRepository};
    use modart_types::entity::EntityKind;

    fn make_author() -> Author {
        Author {
            id: AuthorId::new(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            password: "digest".to_string(),
            articles: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_boxed_author_repository_delegates() {
        let repo = BoxAuthorRepository::new(InMemoryAuthorRepository::default());
        let author = make_author();

        repo.create(&author).await.unwrap();
        let found = repo.get_by_email("grace@navy.mil").await.unwrap().unwrap();
        assert_eq!(found.id, author.id);

        repo.delete(&author.id).await.unwrap();
        let err = repo.delete(&author.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotDeleted(EntityKind::Author)));
    }

    #[tokio::test]
    async fn test_boxed_article_repository_clones_share_state() {
        let repo = BoxArticleRepository::new(InMemoryArticleRepository::default());
        let other = repo.clone();
        let article = Article {
            id: ArticleId::new(),
            author_id: AuthorId::new(),
            title: "Shared".to_string(),
            body: String::new(),
            author: String::new(),
            rate: 1,
            created_at: 0,
        };

        repo.create(&article).await.unwrap();
        assert_eq!(other.list().await.unwrap().len(), 1);
    }
}
