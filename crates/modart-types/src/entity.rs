//! Entity families known to the service.

use std::fmt;

/// The closed set of entity families stored by Modart.
///
/// Key-value table names and repository errors are keyed off this type, so
/// the family of a record is always known statically rather than inferred
/// from the shape of its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Author,
    Article,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Author => write!(f, "author"),
            EntityKind::Article => write!(f, "article"),
        }
    }
}
