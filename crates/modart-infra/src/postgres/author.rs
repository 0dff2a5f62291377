//! PostgreSQL author repository implementation.

use modart_core::repository::author::AuthorRepository;
use modart_types::author::{Author, AuthorId};
use modart_types::entity::EntityKind;
use modart_types::error::RepositoryError;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgRow};

/// PostgreSQL-backed implementation of `AuthorRepository`.
pub struct PgAuthorRepository {
    pool: PgPool,
}

impl PgAuthorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &PgRow) -> Result<Author, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let id = id
        .parse::<AuthorId>()
        .map_err(|e| RepositoryError::Query(format!("invalid author id: {e}")))?;

    let text = |column: &str| -> Result<String, RepositoryError> {
        row.try_get(column)
            .map_err(|e| RepositoryError::Query(e.to_string()))
    };

    Ok(Author {
        id,
        first_name: text("first_name")?,
        last_name: text("last_name")?,
        email: text("email")?,
        password: text("password")?,
        articles: Vec::new(),
    })
}

impl AuthorRepository for PgAuthorRepository {
    async fn create(&self, author: &Author) -> Result<Author, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO authors (id, first_name, last_name, email, password)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(author.id.to_string())
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(&author.email)
        .bind(&author.password)
        .execute(&self.pool)
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
        let row = sqlx::query("SELECT * FROM authors WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Author>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM authors WHERE email = $1 LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Author>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM authors")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(map_row).collect()
    }

    async fn update(&self, author: &Author) -> Result<Author, RepositoryError> {
        let result = sqlx::query(
            "UPDATE authors SET first_name = $1, last_name = $2, email = $3
             WHERE id = $4",
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(&author.email)
        .bind(author.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotUpdated(EntityKind::Author));
        }

        Ok(author.clone())
    }

    async fn delete(&self, id: &AuthorId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotDeleted(EntityKind::Author));
        }

        Ok(())
    }
}
