//! Envelope response format for all API responses.
//!
//! Every response is wrapped in a consistent envelope:
//! ```json
//! {
//!   "data": { ... },
//!   "meta": { "request_id": "...", "timestamp": "...", "response_time_ms": 5 },
//!   "errors": [],
//!   "_links": { "self": "..." }
//! }
//! ```

use std::collections::HashMap;

use serde::Serialize;

/// Envelope response wrapping all API data.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// The main response payload. `null` on errors.
    pub data: Option<T>,

    pub meta: ApiMeta,

    /// Error list (empty on success).
    pub errors: Vec<ApiErrorDetail>,

    #[serde(rename = "_links", skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, String>,
}

/// Metadata included in every response.
#[derive(Debug, Serialize)]
pub struct ApiMeta {
    /// Unique request identifier for tracing.
    pub request_id: String,
    /// RFC 3339 timestamp of the response.
    pub timestamp: String,
    pub response_time_ms: u64,
}

/// Individual error detail.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

fn meta(request_id: String, response_time_ms: u64) -> ApiMeta {
    ApiMeta {
        request_id,
        timestamp: chrono::Utc::now().to_rfc3339(),
        response_time_ms,
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response with data.
    pub fn success(data: T, request_id: String, response_time_ms: u64) -> Self {
        Self {
            data: Some(data),
            meta: meta(request_id, response_time_ms),
            errors: Vec::new(),
            links: HashMap::new(),
        }
    }

    /// Add a HATEOAS link.
    pub fn with_link(mut self, rel: &str, href: &str) -> Self {
        self.links.insert(rel.to_string(), href.to_string());
        self
    }
}

impl ApiResponse<()> {
    /// Create an error response (no data).
    pub fn error(code: &str, message: &str, request_id: String, response_time_ms: u64) -> Self {
        Self {
            data: None,
            meta: meta(request_id, response_time_ms),
            errors: vec![ApiErrorDetail {
                code: code.to_string(),
                message: message.to_string(),
            }],
            links: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::success(serde_json::json!({"id": 1}), "req-1".to_string(), 3)
            .with_link("self", "/api/v1/articles/1");
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["data"]["id"], 1);
        assert_eq!(value["meta"]["request_id"], "req-1");
        assert_eq!(value["meta"]["response_time_ms"], 3);
        assert_eq!(value["errors"], serde_json::json!([]));
        assert_eq!(value["_links"]["self"], "/api/v1/articles/1");
    }

    #[test]
    fn test_error_envelope_shape() {
        let resp = ApiResponse::error("NOT_DELETED", "author not deleted", "req-2".to_string(), 0);
        let value = serde_json::to_value(&resp).unwrap();

        assert!(value["data"].is_null());
        assert_eq!(value["errors"][0]["code"], "NOT_DELETED");
        assert!(value.get("_links").is_none());
    }
}
