//! In-process table engine.
//!
//! Items live in a `DashMap` keyed by `(table, id)`. Clones share the same
//! map. Nothing is persisted.

use std::sync::Arc;

use aws_sdk_dynamodb::types::AttributeValue;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::table::{Item, KEY_ATTRIBUTE, KvError, KvTable, ScanFilter, ScanRequest};

#[derive(Clone, Default)]
pub struct MemoryTable {
    items: Arc<DashMap<(String, String), Item>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }
}

fn passes_filter(item: &Item, filter: Option<&ScanFilter>) -> bool {
    match filter {
        None => true,
        Some(ScanFilter::AttributeNotExists(name)) => !item.contains_key(name),
    }
}

fn project(item: &Item, projection: &[String]) -> Item {
    if projection.is_empty() {
        return item.clone();
    }
    item.iter()
        .filter(|(name, _)| projection.contains(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

impl KvTable for MemoryTable {
    async fn put_if_absent(&self, table: &str, item: Item) -> Result<(), KvError> {
        let Some(AttributeValue::S(id)) = item.get(KEY_ATTRIBUTE) else {
            return Err(KvError::Backend(format!(
                "item has no string '{KEY_ATTRIBUTE}' attribute"
            )));
        };
        let id = id.clone();
        match self.items.entry((table.to_string(), id)) {
            Entry::Occupied(_) => Err(KvError::ConditionFailed),
            Entry::Vacant(slot) => {
                slot.insert(item);
                Ok(())
            }
        }
    }

    async fn update_if_present(
        &self,
        table: &str,
        id: &str,
        changes: Item,
    ) -> Result<Item, KvError> {
        let key = (table.to_string(), id.to_string());
        let Some(mut stored) = self.items.get_mut(&key) else {
            return Err(KvError::ConditionFailed);
        };
        stored.extend(changes);
        Ok(stored.clone())
    }

    async fn get(&self, table: &str, id: &str) -> Result<Option<Item>, KvError> {
        let key = (table.to_string(), id.to_string());
        Ok(self.items.get(&key).map(|item| item.clone()))
    }

    async fn delete(&self, table: &str, id: &str) -> Result<Option<Item>, KvError> {
        let key = (table.to_string(), id.to_string());
        Ok(self.items.remove(&key).map(|(_, item)| item))
    }

    async fn scan(&self, table: &str, request: &ScanRequest) -> Result<Vec<Item>, KvError> {
        Ok(self
            .items
            .iter()
            .filter(|entry| entry.key().0 == table)
            .filter(|entry| passes_filter(entry.value(), request.filter.as_ref()))
            .map(|entry| project(entry.value(), &request.projection))
            .collect())
    }
}
