//! Business logic services (use cases).
//!
//! Services validate input, assign identifiers and derived fields, and
//! delegate to repositories. They depend on traits (ports) -- never on
//! concrete infrastructure implementations.

pub mod article;
pub mod author;
pub mod credential;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
