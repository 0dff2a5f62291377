//! In-memory fakes of the repository and credential ports for service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use modart_types::article::{Article, ArticleId};
use modart_types::author::{Author, AuthorId};
use modart_types::entity::EntityKind;
use modart_types::error::{CredentialError, RepositoryError};

use crate::repository::article::ArticleRepository;
use crate::repository::author::AuthorRepository;
use crate::service::credential::PasswordHasher;

#[derive(Clone, Default)]
pub struct InMemoryAuthorRepository {
    authors: Arc<Mutex<HashMap<AuthorId, Author>>>,
}

impl AuthorRepository for InMemoryAuthorRepository {
    async fn create(&self, author: &Author) -> Result<Author, RepositoryError> {
        let mut authors = self.authors.lock().unwrap();
        if authors.contains_key(&author.id) {
            return Err(RepositoryError::NotCreated(EntityKind::Author));
        }
        let mut stored = author.clone();
        stored.articles.clear();
        authors.insert(author.id.clone(), stored);
        Ok(author.clone())
    }

    async fn get_by_id(&self, id: &AuthorId) -> Result<Option<Author>, RepositoryError> {
        Ok(self.authors.lock().unwrap().get(id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Author>, RepositoryError> {
        Ok(self
            .authors
            .lock()
            .unwrap()
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Author>, RepositoryError> {
        Ok(self.authors.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, author: &Author) -> Result<Author, RepositoryError> {
        let mut authors = self.authors.lock().unwrap();
        let Some(stored) = authors.get_mut(&author.id) else {
            return Err(RepositoryError::NotUpdated(EntityKind::Author));
        };
        stored.first_name = author.first_name.clone();
        stored.last_name = author.last_name.clone();
        stored.email = author.email.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: &AuthorId) -> Result<(), RepositoryError> {
        match self.authors.lock().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotDeleted(EntityKind::Author)),
        }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryArticleRepository {
    articles: Arc<Mutex<HashMap<ArticleId, Article>>>,
}

impl ArticleRepository for InMemoryArticleRepository {
    async fn create(&self, article: &Article) -> Result<Article, RepositoryError> {
        let mut articles = self.articles.lock().unwrap();
        if articles.contains_key(&article.id) {
            return Err(RepositoryError::NotCreated(EntityKind::Article));
        }
        articles.insert(article.id.clone(), article.clone());
        Ok(article.clone())
    }

    async fn get_by_id(&self, id: &ArticleId) -> Result<Option<Article>, RepositoryError> {
        Ok(self.articles.lock().unwrap().get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Article>, RepositoryError> {
        Ok(self.articles.lock().unwrap().values().cloned().collect())
    }

    async fn list_by_author(&self, author_id: &AuthorId) -> Result<Vec<Article>, RepositoryError> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .values()
            .filter(|a| &a.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn update(&self, article: &Article) -> Result<Article, RepositoryError> {
        let mut articles = self.articles.lock().unwrap();
        let Some(stored) = articles.get_mut(&article.id) else {
            return Err(RepositoryError::NotUpdated(EntityKind::Article));
        };
        stored.author_id = article.author_id.clone();
        stored.title = article.title.clone();
        stored.body = article.body.clone();
        stored.author = article.author.clone();
        stored.rate = article.rate;
        Ok(stored.clone())
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), RepositoryError> {
        match self.articles.lock().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotDeleted(EntityKind::Article)),
        }
    }
}

/// Reversible stand-in for a real hasher: "digest:" + reversed plaintext.
#[derive(Default)]
pub struct FakeHasher {
    pub fail: bool,
}

impl PasswordHasher for FakeHasher {
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        if self.fail {
            return Err(CredentialError::Transform("forced failure".to_string()));
        }
        Ok(format!("digest:{}", plaintext.chars().rev().collect::<String>()))
    }

    fn verify(&self, digest: &str, plaintext: &str) -> Result<bool, CredentialError> {
        Ok(self.hash(plaintext)? == digest)
    }
}
