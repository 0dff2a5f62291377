//! SQLite article repository implementation.

use modart_core::repository::article::ArticleRepository;
use modart_types::article::{Article, ArticleId};
use modart_types::author::AuthorId;
use modart_types::entity::EntityKind;
use modart_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ArticleRepository`.
pub struct SqliteArticleRepository {
    pool: DatabasePool,
}

impl SqliteArticleRepository {
    pub fn new(pool: DatabasePool) -> Self {
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
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
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
        let id = self
            .id
            .parse::<ArticleId>()
            .map_err(|e| RepositoryError::Query(format!("invalid article id: {e}")))?;
        let author_id = self
            .author_id
            .parse::<AuthorId>()
            .map_err(|e| RepositoryError::Query(format!("invalid author id: {e}")))?;

        Ok(Article {
            id,
            author_id,
            title: self.title,
            body: self.body,
            author: self.author,
            rate: self.rate,
            created_at: self.created_at,
        })
    }
}

fn map_row(row: &sqlx::sqlite::SqliteRow) -> Result<Article, RepositoryError> {
    ArticleRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_article()
}

impl ArticleRepository for SqliteArticleRepository {
    async fn create(&self, article: &Article) -> Result<Article, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO articles (id, author_id, title, body, author, rate, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(article.id.to_string())
        .bind(article.author_id.to_string())
        .bind(&article.title)
        .bind(&article.body)
        .bind(&article.author)
        .bind(article.rate)
        .bind(article.created_at)
        .execute(&self.pool.writer)
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
        let row = sqlx::query("SELECT * FROM articles WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Article>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM articles")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(map_row).collect()
    }

    async fn list_by_author(&self, author_id: &AuthorId) -> Result<Vec<Article>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM articles WHERE author_id = ? ORDER BY created_at")
            .bind(author_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(map_row).collect()
    }

    async fn update(&self, article: &Article) -> Result<Article, RepositoryError> {
        let result = sqlx::query(
            "UPDATE articles SET author_id = ?, title = ?, body = ?, author = ?, rate = ?
             WHERE id = ?",
        )
        .bind(article.author_id.to_string())
        .bind(&article.title)
        .bind(&article.body)
        .bind(&article.author)
        .bind(article.rate)
        .bind(article.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotUpdated(EntityKind::Article));
        }

        Ok(article.clone())
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
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
    use modart_types::config::PoolSettings;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        std::mem::forget(dir);
        DatabasePool::new(&url, &PoolSettings::default()).await.unwrap()
    }

    fn make_article(author_id: &AuthorId, title: &str, created_at: i64) -> Article {
        Article {
            id: ArticleId::new(),
            author_id: author_id.clone(),
            title: title.to_string(),
            body: format!("Body of {title}"),
            author: "Ada".to_string(),
            rate: 3,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_by_id() {
        let repo = SqliteArticleRepository::new(test_pool().await);
        let article = make_article(&AuthorId::new(), "Notes", 1_700_000_000);

        repo.create(&article).await.unwrap();
        let found = repo.get_by_id(&article.id).await.unwrap().unwrap();
        assert_eq!(found, article);
    }

    #[tokio::test]
    async fn test_list_by_author() {
        let repo = SqliteArticleRepository::new(test_pool().await);
        let ada = AuthorId::new();
        let grace = AuthorId::new();

        let first = make_article(&ada, "First", 10);
        let second = make_article(&ada, "Second", 20);
        repo.create(&second).await.unwrap();
        repo.create(&first).await.unwrap();
        repo.create(&make_article(&grace, "Other", 15)).await.unwrap();

        let by_ada = repo.list_by_author(&ada).await.unwrap();
        assert_eq!(by_ada, vec![first, second]);
        assert_eq!(repo.list().await.unwrap().len(), 3);
        assert!(repo.list_by_author(&AuthorId::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = SqliteArticleRepository::new(test_pool().await);
        let article = make_article(&AuthorId::new(), "Draft", 100);
        repo.create(&article).await.unwrap();

        let mut changed = article.clone();
        changed.title = "Final".to_string();
        changed.rate = 5;
        changed.created_at = 999;
        repo.update(&changed).await.unwrap();

        let found = repo.get_by_id(&article.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Final");
        assert_eq!(found.rate, 5);
        assert_eq!(found.created_at, 100);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let repo = SqliteArticleRepository::new(test_pool().await);
        let ghost = make_article(&AuthorId::new(), "Ghost", 0);

        assert!(repo.get_by_id(&ghost.id).await.unwrap().is_none());
        assert!(matches!(
            repo.update(&ghost).await.unwrap_err(),
            RepositoryError::NotUpdated(EntityKind::Article)
        ));
        assert!(matches!(
            repo.delete(&ghost.id).await.unwrap_err(),
            RepositoryError::NotDeleted(EntityKind::Article)
        ));
    }

    #[tokio::test]
    async fn test_double_delete() {
        let repo = SqliteArticleRepository::new(test_pool().await);
        let article = make_article(&AuthorId::new(), "Once", 0);
        repo.create(&article).await.unwrap();

        repo.delete(&article.id).await.unwrap();
        assert!(matches!(
            repo.delete(&article.id).await.unwrap_err(),
            RepositoryError::NotDeleted(EntityKind::Article)
        ));
    }
}
