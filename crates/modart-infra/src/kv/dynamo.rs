//! DynamoDB table engine.
//!
//! Conditional writes use `attribute_not_exists(id)` for creates and
//! `attribute_exists(id)` for updates. Attribute names in projections, filters
//! and update expressions go through `#placeholders` so reserved words are
//! safe. Tables are expected to exist with a string partition key `id`.

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};

use super::table::{Item, KEY_ATTRIBUTE, KvError, KvTable, ScanFilter, ScanRequest};

#[derive(Clone)]
pub struct DynamoTable {
    client: Client,
}

impl DynamoTable {
    /// Connect using the default AWS credential and region chain, optionally
    /// pointing at a different endpoint (e.g. DynamoDB Local).
    pub async fn connect(endpoint: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(endpoint) = endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let aws_config = loader.load().await;
        tracing::info!(endpoint = endpoint.unwrap_or("aws default"), "dynamodb client ready");
        Self::with_client(Client::new(&aws_config))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn key(id: &str) -> AttributeValue {
    AttributeValue::S(id.to_string())
}

fn backend_error(op: &str, e: impl std::fmt::Display) -> KvError {
    KvError::Backend(format!("dynamodb {op} failed: {e}"))
}

/// `SET #a0 = :v0, #a1 = :v1` plus the placeholder bindings.
fn set_expression(changes: Item) -> (String, Vec<(String, String)>, Vec<(String, AttributeValue)>) {
    let mut clauses = Vec::with_capacity(changes.len());
    let mut names = Vec::with_capacity(changes.len());
    let mut values = Vec::with_capacity(changes.len());
    for (i, (name, value)) in changes.into_iter().enumerate() {
        clauses.push(format!("#a{i} = :v{i}"));
        names.push((format!("#a{i}"), name));
        values.push((format!(":v{i}"), value));
    }
    (format!("SET {}", clauses.join(", ")), names, values)
}

/// Condition guarding creates.
fn absent_condition() -> String {
    format!("attribute_not_exists({KEY_ATTRIBUTE})")
}

/// Condition guarding updates.
fn present_condition() -> String {
    format!("attribute_exists({KEY_ATTRIBUTE})")
}

/// Expression strings and name bindings for one scan request.
#[derive(Debug, Default, PartialEq)]
struct ScanExpressions {
    projection: Option<String>,
    names: Vec<(String, String)>,
    filter: Option<String>,
}

/// Projection as `#p0, #p1, ...` and the filter as `attribute_not_exists(#f)`.
fn scan_expressions(request: &ScanRequest) -> ScanExpressions {
    let mut expressions = ScanExpressions::default();

    if !request.projection.is_empty() {
        let mut placeholders = Vec::with_capacity(request.projection.len());
        for (i, name) in request.projection.iter().enumerate() {
            let placeholder = format!("#p{i}");
            expressions.names.push((placeholder.clone(), name.clone()));
            placeholders.push(placeholder);
        }
        expressions.projection = Some(placeholders.join(", "));
    }
    if let Some(ScanFilter::AttributeNotExists(name)) = &request.filter {
        expressions.names.push(("#f".to_string(), name.clone()));
        expressions.filter = Some("attribute_not_exists(#f)".to_string());
    }

    expressions
}

impl KvTable for DynamoTable {
    async fn put_if_absent(&self, table: &str, item: Item) -> Result<(), KvError> {
        let result = self
            .client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .condition_expression(absent_condition())
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let err = e.into_service_error();
                if err.is_conditional_check_failed_exception() {
                    Err(KvError::ConditionFailed)
                } else {
                    Err(backend_error("put_item", err))
                }
            }
        }
    }

    async fn update_if_present(
        &self,
        table: &str,
        id: &str,
        changes: Item,
    ) -> Result<Item, KvError> {
        let (expression, names, values) = set_expression(changes);
        let mut request = self
            .client
            .update_item()
            .table_name(table)
            .key(KEY_ATTRIBUTE, key(id))
            .update_expression(expression)
            .condition_expression(present_condition())
            .return_values(ReturnValue::AllNew);
        for (placeholder, name) in names {
            request = request.expression_attribute_names(placeholder, name);
        }
        for (placeholder, value) in values {
            request = request.expression_attribute_values(placeholder, value);
        }

        match request.send().await {
            Ok(output) => Ok(output.attributes.unwrap_or_default()),
            Err(e) => {
                let err = e.into_service_error();
                if err.is_conditional_check_failed_exception() {
                    Err(KvError::ConditionFailed)
                } else {
                    Err(backend_error("update_item", err))
                }
            }
        }
    }

    async fn get(&self, table: &str, id: &str) -> Result<Option<Item>, KvError> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .key(KEY_ATTRIBUTE, key(id))
            .send()
            .await
            .map_err(|e| backend_error("get_item", e.into_service_error()))?;

        Ok(output.item)
    }

    async fn delete(&self, table: &str, id: &str) -> Result<Option<Item>, KvError> {
        let output = self
            .client
            .delete_item()
            .table_name(table)
            .key(KEY_ATTRIBUTE, key(id))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| backend_error("delete_item", e.into_service_error()))?;

        Ok(output.attributes.filter(|old| !old.is_empty()))
    }

    async fn scan(&self, table: &str, request: &ScanRequest) -> Result<Vec<Item>, KvError> {
        let expressions = scan_expressions(request);
        let mut items = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let mut scan = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(start_key.take())
                .set_projection_expression(expressions.projection.clone())
                .set_filter_expression(expressions.filter.clone());
            for (placeholder, name) in &expressions.names {
                scan = scan.expression_attribute_names(placeholder, name);
            }

            let output = scan
                .send()
                .await
                .map_err(|e| backend_error("scan", e.into_service_error()))?;

            items.extend(output.items.unwrap_or_default());
            match output.last_evaluated_key {
                Some(last) if !last.is_empty() => start_key = Some(last),
                _ => break,
            }
        }

        tracing::debug!(table, count = items.len(), "dynamodb scan complete");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::article::ARTICLE_FIELDS;
    use crate::kv::author::AUTHOR_FIELDS;

    fn pairs(names: &[(&str, &str)]) -> Vec<(String, String)> {
        names
            .iter()
            .map(|(p, n)| (p.to_string(), n.to_string()))
            .collect()
    }

    #[test]
    fn test_author_listing_scan_expressions() {
        let expressions = scan_expressions(&ScanRequest::listing(AUTHOR_FIELDS));

        assert_eq!(
            expressions.projection.as_deref(),
            Some("#p0, #p1, #p2, #p3, #p4")
        );
        assert_eq!(
            expressions.names,
            pairs(&[
                ("#p0", "id"),
                ("#p1", "first_name"),
                ("#p2", "last_name"),
                ("#p3", "email"),
                ("#p4", "password"),
                ("#f", "Id"),
            ])
        );
        assert_eq!(
            expressions.filter.as_deref(),
            Some("attribute_not_exists(#f)")
        );
    }

    #[test]
    fn test_article_listing_projects_every_field() {
        let expressions = scan_expressions(&ScanRequest::listing(ARTICLE_FIELDS));

        let projected: Vec<&str> = expressions
            .names
            .iter()
            .filter(|(p, _)| p.starts_with("#p"))
            .map(|(_, n)| n.as_str())
            .collect();
        assert_eq!(projected, ARTICLE_FIELDS);
        assert!(expressions.names.contains(&("#f".to_string(), "Id".to_string())));
    }

    #[test]
    fn test_plain_scan_has_no_expressions() {
        assert_eq!(
            scan_expressions(&ScanRequest::default()),
            ScanExpressions::default()
        );
    }

    #[test]
    fn test_write_conditions_on_key_attribute() {
        assert_eq!(absent_condition(), "attribute_not_exists(id)");
        assert_eq!(present_condition(), "attribute_exists(id)");
    }

    #[test]
    fn test_set_expression_uses_placeholders() {
        let changes = Item::from([("body".to_string(), AttributeValue::S("text".to_string()))]);
        let (expression, names, values) = set_expression(changes);

        assert_eq!(expression, "SET #a0 = :v0");
        assert_eq!(names, vec![("#a0".to_string(), "body".to_string())]);
        assert_eq!(
            values,
            vec![(":v0".to_string(), AttributeValue::S("text".to_string()))]
        );
    }
}
