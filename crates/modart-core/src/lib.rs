//! Business logic and repository trait definitions for Modart.
//!
//! This crate defines the "ports" (repository, credential and token traits)
//! that the infrastructure layer implements. It depends only on
//! `modart-types` -- never on `modart-infra` or any database/IO crate.

pub mod repository;
pub mod service;
