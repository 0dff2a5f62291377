//! Shared domain types for Modart.
//!
//! This crate contains the core domain types used across the Modart service:
//! Author, Article, their identifiers, request payloads, session tokens,
//! storage configuration, and the error enums every layer speaks.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod article;
pub mod author;
pub mod config;
pub mod entity;
pub mod error;
pub mod session;
