//! Transport-neutral request / response model.

use reqwest::Method;
use serde_json::Value;

/// A call against the REST backend. `path` is relative to the API base URL
/// and starts with `/`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A successful (2xx) response. An empty body is `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }
}

/// A failed call. `status == 0` means the backend was never reached.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", self.describe())]
pub struct HttpFailure {
    pub status: u16,
    pub status_text: String,
    /// Parsed JSON body, or the raw text as a JSON string.
    pub body: Option<Value>,
}

impl HttpFailure {
    pub fn new(status: u16, status_text: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body,
        }
    }

    pub fn network(reason: impl Into<String>) -> Self {
        Self::new(0, reason, None)
    }

    pub fn is_network(&self) -> bool {
        self.status == 0
    }

    fn describe(&self) -> String {
        if self.is_network() {
            format!("network error: {}", self.status_text)
        } else {
            format!("HTTP {} {}", self.status, self.status_text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_display_status_or_network_reason() {
        let http = HttpFailure::new(404, "Not Found", None);
        assert_eq!(http.to_string(), "HTTP 404 Not Found");

        let network = HttpFailure::network("connection refused");
        assert!(network.is_network());
        assert_eq!(network.to_string(), "network error: connection refused");
    }

    #[test]
    fn failures_are_std_errors() {
        let err: Box<dyn std::error::Error> = Box::new(HttpFailure::new(500, "Internal Server Error", None));
        assert!(err.source().is_none());
    }
}
