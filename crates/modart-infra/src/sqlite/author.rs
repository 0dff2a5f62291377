//! SQLite author repository implementation.

use modart_core::repository::author::AuthorRepository;
use modart_types::author::{Author, AuthorId};
use modart_types::entity::EntityKind;
use modart_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `AuthorRepository`.
pub struct SqliteAuthorRepository {
    pool: DatabasePool,
}

impl SqliteAuthorRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Author.
struct AuthorRow {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

impl AuthorRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
        })
    }

    fn into_author(self) -> Result<Author, RepositoryError> {
        let id = self
            .id
            .parse::<AuthorId>()
            .map_err(|e| RepositoryError::Query(format!("invalid author id: {e}")))?;

        Ok(Author {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: self.password,
            articles: Vec::new(),
        })
    }
}

fn map_row(row: &sqlx::sqlite::SqliteRow) -> Result<Author, RepositoryError> {
    AuthorRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_author()
}

impl AuthorRepository for SqliteAuthorRepository {
    async fn create(&self, author: &Author) -> Result<Author, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO authors (id, first_name, last_name, email, password)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(author.id.to_string())
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(&author.email)
        .bind(&author.password)
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 1 => Ok(author.clone()),
            Ok(_) => Err(RepositoryError::NotCreated(EntityKind::Author)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::debug!(author_id = %author.id, "author id already taken");
                Err(RepositoryError::NotCreated(EntityKind::Author))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: &AuthorId) -> Result<Option<Author>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM authors WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Author>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM authors WHERE email = ? LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Author>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM authors")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(map_row).collect()
    }

    async fn update(&self, author: &Author) -> Result<Author, RepositoryError> {
        let result = sqlx::query(
            "UPDATE authors SET first_name = ?, last_name = ?, email = ?
             WHERE id = ?",
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(&author.email)
        .bind(author.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotUpdated(EntityKind::Author));
        }

        Ok(author.clone())
    }

    async fn delete(&self, id: &AuthorId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotDeleted(EntityKind::Author));
        }

        Ok(())
    }
}
