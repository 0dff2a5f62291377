//! Key-value author repository implementation.

use modart_core::repository::author::AuthorRepository;
use modart_types::author::{Author, AuthorId};
use modart_types::entity::EntityKind;
use modart_types::error::RepositoryError;

use super::item::{get_string, string, string_or_default};
use super::table::{Item, KEY_ATTRIBUTE, KvTable, ScanRequest};

/// Attributes stored for an author.
pub(crate) const AUTHOR_FIELDS: &[&str] = &[KEY_ATTRIBUTE, "first_name", "last_name", "email", "password"];

/// `AuthorRepository` over any [`KvTable`] engine.
pub struct KvAuthorRepository<T: KvTable> {
    table: T,
    table_name: String,
}

impl<T: KvTable> KvAuthorRepository<T> {
    pub fn new(table: T, table_name: impl Into<String>) -> Self {
        Self {
            table,
            table_name: table_name.into(),
        }
    }
}

fn to_item(author: &Author) -> Item {
    Item::from([
        (KEY_ATTRIBUTE.to_string(), string(author.id.to_string())),
        ("first_name".to_string(), string(&author.first_name)),
        ("last_name".to_string(), string(&author.last_name)),
        ("email".to_string(), string(&author.email)),
        ("password".to_string(), string(&author.password)),
    ])
}

fn from_item(item: &Item) -> Result<Author, RepositoryError> {
    let id = get_string(item, KEY_ATTRIBUTE)?
        .parse::<AuthorId>()
        .map_err(|e| RepositoryError::Query(format!("invalid author id: {e}")))?;

    Ok(Author {
        id,
        first_name: string_or_default(item, "first_name"),
        last_name: string_or_default(item, "last_name"),
        email: string_or_default(item, "email"),
        password: string_or_default(item, "password"),
        articles: Vec::new(),
    })
}

impl<T: KvTable> AuthorRepository for KvAuthorRepository<T> {
    async fn create(&self, author: &Author) -> Result<Author, RepositoryError> {
        self.table
            .put_if_absent(&self.table_name, to_item(author))
            .await
            .map_err(|e| e.into_repository(RepositoryError::NotCreated(EntityKind::Author)))?;
        Ok(author.clone())
    }

    async fn get_by_id(&self, id: &AuthorId) -> Result<Option<Author>, RepositoryError> {
        let item = self.table.get(&self.table_name, &id.to_string()).await?;
        item.as_ref().map(from_item).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Author>, RepositoryError> {
        let authors = self.list().await?;
        Ok(authors.into_iter().find(|a| a.email == email))
    }

    async fn list(&self) -> Result<Vec<Author>, RepositoryError> {
        let items = self
            .table
            .scan(&self.table_name, &ScanRequest::listing(AUTHOR_FIELDS))
            .await?;
        items.iter().map(from_item).collect()
    }

    async fn update(&self, author: &Author) -> Result<Author, RepositoryError> {
        let changes = Item::from([
            ("first_name".to_string(), string(&author.first_name)),
            ("last_name".to_string(), string(&author.last_name)),
            ("email".to_string(), string(&author.email)),
        ]);
        let stored = self
            .table
            .update_if_present(&self.table_name, &author.id.to_string(), changes)
            .await
            .map_err(|e| e.into_repository(RepositoryError::NotUpdated(EntityKind::Author)))?;
        from_item(&stored)
    }

    async fn delete(&self, id: &AuthorId) -> Result<(), RepositoryError> {
        match self.table.delete(&self.table_name, &id.to_string()).await? {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotDeleted(EntityKind::Author)),
        }
    }
}
