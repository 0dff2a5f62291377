//! Table engine trait shared by the DynamoDB and in-process backends.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use modart_types::error::RepositoryError;
use thiserror::Error;

/// One stored record: attribute name to typed value.
pub type Item = HashMap<String, AttributeValue>;

/// Primary key attribute of every table.
pub const KEY_ATTRIBUTE: &str = "id";

/// Errors from a table engine.
#[derive(Debug, Error)]
pub enum KvError {
    /// The write's existence condition on `id` did not hold.
    #[error("conditional check failed")]
    ConditionFailed,

    #[error("key-value backend error: {0}")]
    Backend(String),
}

impl KvError {
    /// Map onto the repository contract, turning a failed condition into the
    /// given "not applied" error.
    pub fn into_repository(self, on_condition: RepositoryError) -> RepositoryError {
        match self {
            KvError::ConditionFailed => on_condition,
            KvError::Backend(msg) => RepositoryError::Query(msg),
        }
    }
}

impl From<KvError> for RepositoryError {
    fn from(e: KvError) -> Self {
        RepositoryError::Query(e.to_string())
    }
}

/// Scan predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanFilter {
    /// Keep items that lack the named attribute.
    AttributeNotExists(String),
}

/// Full-table scan parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanRequest {
    /// Attributes to return; empty returns every attribute.
    pub projection: Vec<String>,
    pub filter: Option<ScanFilter>,
}

impl ScanRequest {
    /// Scan returning the entity's stored field set, with the filter the
    /// stored tables have always been listed with. `Id` (capital I) is never
    /// written, so the filter matches every item.
    pub fn listing(fields: &[&str]) -> Self {
        Self {
            projection: fields.iter().map(|f| f.to_string()).collect(),
            filter: Some(ScanFilter::AttributeNotExists("Id".to_string())),
        }
    }
}

/// A set of key-value tables addressed by name.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KvTable: Send + Sync {
    /// Write a new item. Fails with `ConditionFailed` if an item with the
    /// same `id` already exists (`attribute_not_exists(id)`).
    fn put_if_absent(
        &self,
        table: &str,
        item: Item,
    ) -> impl std::future::Future<Output = Result<(), KvError>> + Send;

    /// Set the given attributes on an existing item and return the item as
    /// stored afterwards. Attributes not named in `changes` are untouched.
    /// Fails with `ConditionFailed` if no item has this `id`
    /// (`attribute_exists(id)`).
    fn update_if_present(
        &self,
        table: &str,
        id: &str,
        changes: Item,
    ) -> impl std::future::Future<Output = Result<Item, KvError>> + Send;

    /// Fetch an item by `id`.
    fn get(
        &self,
        table: &str,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Item>, KvError>> + Send;

    /// Remove an item, returning its previous attributes if it existed.
    fn delete(
        &self,
        table: &str,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Item>, KvError>> + Send;

    /// Read every item in the table, following pagination to the end.
    fn scan(
        &self,
        table: &str,
        request: &ScanRequest,
    ) -> impl std::future::Future<Output = Result<Vec<Item>, KvError>> + Send;
}

