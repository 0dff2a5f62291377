//! REST API request handlers.

pub mod article;
pub mod author;
