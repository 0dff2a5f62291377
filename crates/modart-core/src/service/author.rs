//! Author management service.
//!
//! Validates signup input, assigns ids, hashes passwords before they reach
//! storage, and authenticates logins. Token issuance is left to the caller.

use modart_types::author::{
    Author, AuthorId, CreateAuthorRequest, LoginRequest, UpdateAuthorRequest, is_valid_email,
};
use modart_types::error::AuthorError;

use crate::repository::article::ArticleRepository;
use crate::repository::author::AuthorRepository;
use crate::service::credential::PasswordHasher;

/// Service orchestrating the author lifecycle and login.
///
/// Generic over repository and hasher traits -- modart-core never depends on
/// modart-infra. The article repository is only read, to attach an author's
/// articles on single-record reads.
pub struct AuthorService<R: AuthorRepository, A: ArticleRepository, H: PasswordHasher> {
    author_repo: R,
    article_repo: A,
    hasher: H,
}

impl<R: AuthorRepository, A: ArticleRepository, H: PasswordHasher> AuthorService<R, A, H> {
    pub fn new(author_repo: R, article_repo: A, hasher: H) -> Self {
        Self {
            author_repo,
            article_repo,
            hasher,
        }
    }

    /// Register a new author.
    ///
    /// 1. Validates first name, email shape and password presence
    /// 2. Assigns a fresh id
    /// 3. Replaces the plaintext password with its digest
    /// 4. Persists the record
    pub async fn create_author(&self, request: CreateAuthorRequest) -> Result<Author, AuthorError> {
        let (first_name, last_name, email) =
            validate_profile(&request.first_name, &request.last_name, &request.email)?;
        if request.password.is_empty() {
            return Err(AuthorError::InvalidInput(
                "password cannot be empty".to_string(),
            ));
        }

        let password = self
            .hasher
            .hash(&request.password)
            .map_err(|e| AuthorError::TransformError(e.to_string()))?;

        let author = Author {
            id: AuthorId::new(),
            first_name,
            last_name,
            email,
            password,
            articles: Vec::new(),
        };

        let author = self.author_repo.create(&author).await?;
        tracing::info!(author_id = %author.id, "author created");
        Ok(author)
    }

    /// Authenticate an author by email and password.
    ///
    /// Returns `NotFound` when no author has the email and
    /// `InvalidCredentials` when the password does not match the digest.
    pub async fn login_author(&self, request: LoginRequest) -> Result<Author, AuthorError> {
        let author = self
            .author_repo
            .get_by_email(request.email.trim())
            .await?
            .ok_or(AuthorError::NotFound)?;

        let matches = self
            .hasher
            .verify(&author.password, &request.password)
            .map_err(|e| AuthorError::TransformError(e.to_string()))?;
        if !matches {
            tracing::debug!(author_id = %author.id, "login rejected: password mismatch");
            return Err(AuthorError::InvalidCredentials);
        }

        tracing::info!(author_id = %author.id, "author logged in");
        Ok(author)
    }

    /// Get an author by ID, with their articles attached.
    pub async fn read_author(&self, id: &AuthorId) -> Result<Author, AuthorError> {
        let mut author = self
            .author_repo
            .get_by_id(id)
            .await?
            .ok_or(AuthorError::NotFound)?;
        author.articles = self.article_repo.list_by_author(id).await?;
        Ok(author)
    }

    /// List all authors. Articles are not attached.
    pub async fn read_authors(&self) -> Result<Vec<Author>, AuthorError> {
        Ok(self.author_repo.list().await?)
    }

    /// Replace an author's names and email with the submitted values. The id
    /// and password digest are carried over from the stored record.
    pub async fn update_author(
        &self,
        id: &AuthorId,
        request: UpdateAuthorRequest,
    ) -> Result<Author, AuthorError> {
        let mut author = self
            .author_repo
            .get_by_id(id)
            .await?
            .ok_or(AuthorError::NotUpdated)?;
        author.first_name = request.first_name;
        author.last_name = request.last_name;
        author.email = request.email;

        Ok(self.author_repo.update(&author).await?)
    }

    /// Permanently delete an author. Their articles are left in place.
    pub async fn delete_author(&self, id: &AuthorId) -> Result<(), AuthorError> {
        self.author_repo.delete(id).await?;
        tracing::info!(author_id = %id, "author deleted");
        Ok(())
    }
}

/// Trim and check the signup profile fields.
fn validate_profile(
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<(String, String, String), AuthorError> {
    let first_name = first_name.trim();
    if first_name.is_empty() {
        return Err(AuthorError::InvalidInput(
            "first_name cannot be empty".to_string(),
        ));
    }
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(AuthorError::InvalidInput(format!(
            "email '{email}' is not a valid address"
        )));
    }
    Ok((
        first_name.to_string(),
        last_name.trim().to_string(),
        email.to_string(),
    ))
}
