//! Key-value article repository implementation.

use modart_core::repository::article::ArticleRepository;
use modart_types::article::{Article, ArticleId};
use modart_types::author::AuthorId;
use modart_types::entity::EntityKind;
use modart_types::error::RepositoryError;

use super::item::{get_string, number, number_or_default, string, string_or_default};
use super::table::{Item, KEY_ATTRIBUTE, KvTable, ScanRequest};

pub(crate) const ARTICLE_FIELDS: &[&str] = &[
    KEY_ATTRIBUTE,
    "author_id",
    "title",
    "body",
    "author",
    "rate",
    "created_at",
];

/// `ArticleRepository` over any [`KvTable`] engine.
pub struct KvArticleRepository<T: KvTable> {
    table: T,
    table_name: String,
}

impl<T: KvTable> KvArticleRepository<T> {
    pub fn new(table: T, table_name: impl Into<String>) -> Self {
        Self {
            table,
            table_name: table_name.into(),
        }
    }
}

/// Attributes `update` may overwrite. `created_at` is not among them.
fn mutable_fields(article: &Article) -> Item {
    Item::from([
        ("author_id".to_string(), string(article.author_id.to_string())),
        ("title".to_string(), string(&article.title)),
        ("body".to_string(), string(&article.body)),
        ("author".to_string(), string(&article.author)),
        ("rate".to_string(), number(article.rate)),
    ])
}

fn to_item(article: &Article) -> Item {
    let mut item = mutable_fields(article);
    item.insert(KEY_ATTRIBUTE.to_string(), string(article.id.to_string()));
    item.insert("created_at".to_string(), number(article.created_at));
    item
}

fn from_item(item: &Item) -> Result<Article, RepositoryError> {
    let id = get_string(item, KEY_ATTRIBUTE)?
        .parse::<ArticleId>()
        .map_err(|e| RepositoryError::Query(format!("invalid article id: {e}")))?;
    let author_id = get_string(item, "author_id")?
        .parse::<AuthorId>()
        .map_err(|e| RepositoryError::Query(format!("invalid author id: {e}")))?;

    Ok(Article {
        id,
        author_id,
        title: string_or_default(item, "title"),
        body: string_or_default(item, "body"),
        author: string_or_default(item, "author"),
        rate: number_or_default(item, "rate")?,
        created_at: number_or_default(item, "created_at")?,
    })
}

impl<T: KvTable> ArticleRepository for KvArticleRepository<T> {
    async fn create(&self, article: &Article) -> Result<Article, RepositoryError> {
        self.table
            .put_if_absent(&self.table_name, to_item(article))
            .await
            .map_err(|e| e.into_repository(RepositoryError::NotCreated(EntityKind::Article)))?;
        Ok(article.clone())
    }

    async fn get_by_id(&self, id: &ArticleId) -> Result<Option<Article>, RepositoryError> {
        let item = self.table.get(&self.table_name, &id.to_string()).await?;
        item.as_ref().map(from_item).transpose()
    }

    async fn list(&self) -> Result<Vec<Article>, RepositoryError> {
        let items = self
            .table
            .scan(&self.table_name, &ScanRequest::listing(ARTICLE_FIELDS))
            .await?;
        items.iter().map(from_item).collect()
    }

    async fn list_by_author(&self, author_id: &AuthorId) -> Result<Vec<Article>, RepositoryError> {
        let mut articles: Vec<Article> = self
            .list()
            .await?
            .into_iter()
            .filter(|a| &a.author_id == author_id)
            .collect();
        articles.sort_by_key(|a| a.created_at);
        Ok(articles)
    }

    async fn update(&self, article: &Article) -> Result<Article, RepositoryError> {
        let stored = self
            .table
            .update_if_present(
                &self.table_name,
                &article.id.to_string(),
                mutable_fields(article),
            )
            .await
            .map_err(|e| e.into_repository(RepositoryError::NotUpdated(EntityKind::Article)))?;
        from_item(&stored)
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), RepositoryError> {
        match self.table.delete(&self.table_name, &id.to_string()).await? {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotDeleted(EntityKind::Article)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::memory::MemoryTable;

    fn make_article(author_id: &AuthorId, title: &str, created_at: i64) -> Article {
        Article {
            id: ArticleId::new(),
            author_id: author_id.clone(),
            title: title.to_string(),
            body: format!("Body of {title}"),
            author: "Ada".to_string(),
            rate: -2,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_by_id() {
        let repo = KvArticleRepository::new(MemoryTable::new(), "Articles");
        let article = make_article(&AuthorId::new(), "Notes", 1_700_000_000);

        repo.create(&article).await.unwrap();
        assert_eq!(repo.get_by_id(&article.id).await.unwrap(), Some(article));
    }

    #[tokio::test]
    async fn test_tables_are_separate() {
        let engine = MemoryTable::new();
        let articles = KvArticleRepository::new(engine.clone(), "Articles");
        let drafts = KvArticleRepository::new(engine, "Drafts");
        articles
            .create(&make_article(&AuthorId::new(), "Published", 1))
            .await
            .unwrap();

        assert_eq!(articles.list().await.unwrap().len(), 1);
        assert!(drafts.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_author_sorted_by_creation() {
        let repo = KvArticleRepository::new(MemoryTable::new(), "Articles");
        let ada = AuthorId::new();
        let first = make_article(&ada, "First", 10);
        let second = make_article(&ada, "Second", 20);
        repo.create(&second).await.unwrap();
        repo.create(&first).await.unwrap();
        repo.create(&make_article(&AuthorId::new(), "Other", 15))
            .await
            .unwrap();

        assert_eq!(repo.list_by_author(&ada).await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = KvArticleRepository::new(MemoryTable::new(), "Articles");
        let article = make_article(&AuthorId::new(), "Draft", 100);
        repo.create(&article).await.unwrap();

        let mut changed = article.clone();
        changed.title = "Final".to_string();
        changed.created_at = 999;
        let stored = repo.update(&changed).await.unwrap();

        assert_eq!(stored.title, "Final");
        assert_eq!(stored.created_at, 100);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let repo = KvArticleRepository::new(MemoryTable::new(), "Articles");
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
}
