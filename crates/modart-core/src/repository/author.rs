//! Author repository trait definition.

use modart_types::author::{Author, AuthorId};
use modart_types::error::RepositoryError;

/// Repository trait for author persistence.
///
/// Implementations live in modart-infra (SqliteAuthorRepository,
/// KvAuthorRepository). Uses native async fn in traits (no async_trait macro).
///
/// `articles` on the stored record is never persisted; repositories return
/// authors with an empty article list.
pub trait AuthorRepository: Send + Sync {
    /// Persist a new author. Returns the record as written.
    fn create(
        &self,
        author: &Author,
    ) -> impl std::future::Future<Output = Result<Author, RepositoryError>> + Send;

    /// Get an author by its unique ID.
    fn get_by_id(
        &self,
        id: &AuthorId,
    ) -> impl std::future::Future<Output = Result<Option<Author>, RepositoryError>> + Send;

    /// Get the first author whose email matches exactly.
    fn get_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<Author>, RepositoryError>> + Send;

    /// List every author.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Author>, RepositoryError>> + Send;

    /// Replace first name, last name and email of an existing author.
    /// The stored password digest is left untouched.
    fn update(
        &self,
        author: &Author,
    ) -> impl std::future::Future<Output = Result<Author, RepositoryError>> + Send;

    /// Permanently delete an author by ID.
    fn delete(
        &self,
        id: &AuthorId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
