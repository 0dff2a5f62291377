//! Key-value storage layer.
//!
//! Each record is one attribute map keyed by its `id` attribute, stored in a
//! per-entity table. Repositories are written against the [`KvTable`] trait;
//! [`DynamoTable`] talks to DynamoDB and [`MemoryTable`] keeps everything
//! in-process.

pub mod article;
pub mod author;
pub mod dynamo;
pub mod item;
pub mod memory;
pub mod table;

pub use dynamo::DynamoTable;
pub use memory::MemoryTable;
pub use table::{Item, KvError, KvTable, ScanFilter, ScanRequest};
