// src/api/types.rs
//! Request description shared by the HTTP client and its test doubles.

use serde_json::Value;
use std::fmt;

/// The HTTP verbs the Notion API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        };
        write!(f, "{}", verb)
    }
}

/// One Notion API call: verb, endpoint path relative to the API root,
/// query parameters and an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: HttpMethod, endpoint: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint, None)
    }

    pub fn post(endpoint: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, endpoint, Some(body))
    }

    pub fn patch(endpoint: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Patch, endpoint, Some(body))
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, endpoint, None)
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Value of a query parameter, if set.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builders() {
        let request = ApiRequest::get("blocks/abc/children")
            .with_query("page_size", "10")
            .with_query("start_cursor", "c1");
        assert_eq!(request.to_string(), "GET blocks/abc/children");
        assert_eq!(request.query_value("page_size"), Some("10"));
        assert_eq!(request.query_value("missing"), None);
        assert!(request.body.is_none());

        let patch = ApiRequest::patch("pages/p", json!({"archived": true}));
        assert_eq!(patch.method, HttpMethod::Patch);
        assert_eq!(patch.body, Some(json!({"archived": true})));
        assert_eq!(ApiRequest::delete("blocks/b").to_string(), "DELETE blocks/b");
    }
}
