//! Application state wiring all services together.
//!
//! Services are generic over repository and hasher traits; AppState pins them
//! to the type-erased repositories of whichever backend was opened and the
//! concrete credential implementations from modart-infra.

use std::sync::Arc;

use modart_core::repository::boxed::{BoxArticleRepository, BoxAuthorRepository};
use modart_core::service::article::ArticleService;
use modart_core::service::author::AuthorService;
use modart_core::service::session::TokenIssuer;
use modart_infra::backend::{Repositories, open_repositories};
use modart_infra::crypto::password::Argon2PasswordHasher;
use modart_types::config::{StorageBackend, StorageConfig};

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteAuthorService =
    AuthorService<BoxAuthorRepository, BoxArticleRepository, Argon2PasswordHasher>;

pub type ConcreteArticleService = ArticleService<BoxArticleRepository>;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub author_service: Arc<ConcreteAuthorService>,
    pub article_service: Arc<ConcreteArticleService>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    /// Max-Age of the session cookie, in seconds.
    pub cookie_max_age_secs: u32,
    pub backend: StorageBackend,
}

impl AppState {
    /// Open the configured storage backend and wire the services over it.
    pub async fn init(
        storage: &StorageConfig,
        token_issuer: Arc<dyn TokenIssuer>,
        cookie_max_age_secs: u32,
    ) -> anyhow::Result<Self> {
        let repos = open_repositories(storage).await?;
        Ok(Self::from_repositories(
            repos,
            storage.backend(),
            token_issuer,
            cookie_max_age_secs,
        ))
    }

    pub fn from_repositories(
        repos: Repositories,
        backend: StorageBackend,
        token_issuer: Arc<dyn TokenIssuer>,
        cookie_max_age_secs: u32,
    ) -> Self {
        let author_service = AuthorService::new(
            repos.authors,
            repos.articles.clone(),
            Argon2PasswordHasher::new(),
        );
        let article_service = ArticleService::new(repos.articles);

        Self {
            author_service: Arc::new(author_service),
            article_service: Arc::new(article_service),
            token_issuer,
            cookie_max_age_secs,
            backend,
        }
    }
}
