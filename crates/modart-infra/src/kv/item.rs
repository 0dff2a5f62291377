//! Attribute-map marshalling helpers.
//!
//! Strings are stored as `S`, integers as `N`. Unmarshalling is lenient in
//! the same way the stored tables have always been read: a missing or
//! differently-typed attribute reads as the zero value, except where the
//! caller asks for a required string.

use aws_sdk_dynamodb::types::AttributeValue;
use modart_types::error::RepositoryError;

use super::table::Item;

pub fn string(value: impl Into<String>) -> AttributeValue {
    AttributeValue::S(value.into())
}

pub fn number(value: impl ToString) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

/// A string attribute that must be present.
pub fn get_string(item: &Item, name: &str) -> Result<String, RepositoryError> {
    match item.get(name) {
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        Some(_) => Err(RepositoryError::Query(format!(
            "attribute '{name}' is not a string"
        ))),
        None => Err(RepositoryError::Query(format!("attribute '{name}' missing"))),
    }
}

/// A string attribute, or empty.
pub fn string_or_default(item: &Item, name: &str) -> String {
    match item.get(name) {
        Some(AttributeValue::S(value)) => value.clone(),
        _ => String::new(),
    }
}

/// A numeric attribute, or zero.
pub fn number_or_default<T>(item: &Item, name: &str) -> Result<T, RepositoryError>
where
    T: std::str::FromStr + Default,
    T::Err: std::fmt::Display,
{
    match item.get(name) {
        Some(AttributeValue::N(value)) => value
            .parse()
            .map_err(|e| RepositoryError::Query(format!("attribute '{name}': {e}"))),
        _ => Ok(T::default()),
    }
}
