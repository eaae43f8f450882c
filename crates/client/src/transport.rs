//! Request execution.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::request::{ApiRequest, ApiResponse, HttpFailure};

/// Performs one request. Non-2xx answers and connection problems are both
/// reported as [`HttpFailure`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, HttpFailure>;
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, HttpFailure> {
        (**self).send(request).await
    }
}

/// `reqwest`-backed transport rooted at the API base URL.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
    token: Option<String>,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(30),
            token: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, HttpFailure> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut req = self
            .client
            .request(request.method.clone(), &url)
            .timeout(self.timeout);

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| HttpFailure::network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| HttpFailure::network(e.to_string()))?;
        let body = parse_body(&text);

        if status.is_success() {
            Ok(ApiResponse {
                status: status.as_u16(),
                body: body.unwrap_or(Value::Null),
            })
        } else {
            Err(HttpFailure::new(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                body,
            ))
        }
    }
}

fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}
