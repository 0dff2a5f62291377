//! PostgreSQL article repository implementation.

use modart_core::repository::article::ArticleRepository;
use modart_types::article::{Article, ArticleId};
use modart_types::author::AuthorId;
use modart_types::entity::EntityKind;
use modart_types::error::RepositoryError;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgRow};

/// PostgreSQL-backed implementation of `ArticleRepository`.
pub struct PgArticleRepository {
    pool: PgPool,
}

impl PgArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

struct ArticleRow {
    id: String,
    author_id: String,
    title: String,
    body: String,
    author: String,
    rate: i32,
    created_at: i64,
}

impl ArticleRow {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            author_id: row.try_get("author_id")?,
            title: row.try_get("title")?,
            body: row.try_get("body")?,
            author: row.try_get("author")?,
            rate: row.try_get("rate")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_article(self) -> Result<Article, RepositoryError> {
        Ok(Article {
            id: self
                .id
                .parse::<ArticleId>()
                .map_err(|e| RepositoryError::Query(format!("invalid article id: {e}")))?,
            author_id: self
                .author_id
                .parse::<AuthorId>()
                .map_err(|e| RepositoryError::Query(format!("invalid author id: {e}")))?,
            title: self.title,
            body: self.body,
            author: self.author,
            rate: self.rate,
            created_at: self.created_at,
        })
    }
}

fn map_row(row: &PgRow) -> Result<Article, RepositoryError> {
    ArticleRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_article()
}

impl ArticleRepository for PgArticleRepository {
    async fn create(&self, article: &Article) -> Result<Article, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO articles (id, author_id, title, body, author, rate, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(article.id.to_string())
        .bind(article.author_id.to_string())
        .bind(&article.title)
        .bind(&article.body)
        .bind(&article.author)
        .bind(article.rate)
        .bind(article.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 1 => Ok(article.clone()),
            Ok(_) => Err(RepositoryError::NotCreated(EntityKind::Article)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(RepositoryError::NotCreated(EntityKind::Article))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: &ArticleId) -> Result<Option<Article>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM articles WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Article>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM articles")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(map_row).collect()
    }

    async fn list_by_author(&self, author_id: &AuthorId) -> Result<Vec<Article>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM articles WHERE author_id = $1 ORDER BY created_at")
            .bind(author_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(map_row).collect()
    }

    async fn update(&self, article: &Article) -> Result<Article, RepositoryError> {
        let result = sqlx::query(
            "UPDATE articles SET author_id = $1, title = $2, body = $3, author = $4, rate = $5
             WHERE id = $6",
        )
        .bind(article.author_id.to_string())
        .bind(&article.title)
        .bind(&article.body)
        .bind(&article.author)
        .bind(article.rate)
        .bind(article.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotUpdated(EntityKind::Article));
        }

        Ok(article.clone())
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotDeleted(EntityKind::Article));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postgres::pool::test_pool;

    #[tokio::test]
    #[ignore = "needs a PostgreSQL server at MODART_TEST_POSTGRES_URL"]
    async fn test_article_lifecycle() {
        let repo = PgArticleRepository::new(test_pool().await);
        let author_id = AuthorId::new();
        let article = Article {
            id: ArticleId::new(),
            author_id: author_id.clone(),
            title: "Notes".to_string(),
            body: "On the Analytical Engine".to_string(),
            author: "Ada".to_string(),
            rate: 5,
            created_at: 1_700_000_000,
        };

        repo.create(&article).await.unwrap();
        assert_eq!(repo.list_by_author(&author_id).await.unwrap(), vec![article.clone()]);

        let mut changed = article.clone();
        changed.title = "Revised".to_string();
        changed.created_at = 0;
        repo.update(&changed).await.unwrap();

        let found = repo.get_by_id(&article.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Revised");
        assert_eq!(found.created_at, article.created_at);

        repo.delete(&article.id).await.unwrap();
        assert!(repo.get_by_id(&article.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&article.id).await.unwrap_err(),
            RepositoryError::NotDeleted(EntityKind::Article)
        ));
    }
}
