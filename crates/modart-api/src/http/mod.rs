//! HTTP/REST API layer for Modart.
//!
//! Axum-based REST API at `/api/v1/` with envelope response format, cookie
//! session issuance on login, and CORS support.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod session;
