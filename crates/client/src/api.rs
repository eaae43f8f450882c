//! Products REST API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use catalog_core::ProductId;
use catalog_products::{Product, ProductPage};

use crate::error::ClientError;
use crate::interceptor::HttpPipeline;
use crate::request::ApiRequest;
use crate::transport::Transport;

const BASE: &str = "/products";

/// Search and pagination parameters for `GET /products`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub q: String,
    pub page: usize,
    pub size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            page: 1,
            size: 10,
        }
    }
}

/// Operations the catalog needs from the backend.
#[async_trait]
pub trait ProductsBackend: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<ProductPage, ClientError>;

    async fn get(&self, id: &ProductId) -> Result<Product, ClientError>;

    /// Whether a product with this id already exists.
    async fn verify_id(&self, id: &ProductId) -> Result<bool, ClientError>;

    async fn create(&self, product: &Product) -> Result<Product, ClientError>;

    async fn update(&self, id: &ProductId, product: &Product) -> Result<Product, ClientError>;

    async fn remove(&self, id: &ProductId) -> Result<(), ClientError>;
}

/// HTTP implementation of [`ProductsBackend`].
pub struct ProductsApi<T> {
    pipeline: HttpPipeline<T>,
}

impl<T: Transport> ProductsApi<T> {
    pub fn new(pipeline: HttpPipeline<T>) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &HttpPipeline<T> {
        &self.pipeline
    }

    async fn call(&self, request: ApiRequest) -> Result<Value, ClientError> {
        Ok(self.pipeline.execute(request).await?.body)
    }
}

/// `true` / `false`, or `{ "exists": bool }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Verification {
    Bare(bool),
    Wrapped { exists: bool },
}

#[async_trait]
impl<T: Transport> ProductsBackend for ProductsApi<T> {
    async fn list(&self, query: &ListQuery) -> Result<ProductPage, ClientError> {
        let mut request = ApiRequest::get(BASE);
        if !query.q.is_empty() {
            request = request.with_query("q", &query.q);
        }
        request = request
            .with_query("page", query.page)
            .with_query("size", query.size);

        let page: ProductPage = serde_json::from_value(self.call(request).await?)?;
        tracing::debug!(items = page.items.len(), total = page.total, "listed products");
        Ok(page)
    }

    async fn get(&self, id: &ProductId) -> Result<Product, ClientError> {
        let body = self.call(ApiRequest::get(format!("{BASE}/{id}"))).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn verify_id(&self, id: &ProductId) -> Result<bool, ClientError> {
        let body = self
            .call(ApiRequest::get(format!("{BASE}/verification/{id}")))
            .await?;
        Ok(match serde_json::from_value(body)? {
            Verification::Bare(exists) | Verification::Wrapped { exists } => exists,
        })
    }

    async fn create(&self, product: &Product) -> Result<Product, ClientError> {
        let body = self
            .call(ApiRequest::post(BASE, serde_json::to_value(product)?))
            .await?;
        Ok(echoed_or(body, product))
    }

    async fn update(&self, id: &ProductId, product: &Product) -> Result<Product, ClientError> {
        let body = self
            .call(ApiRequest::put(format!("{BASE}/{id}"), serde_json::to_value(product)?))
            .await?;
        Ok(echoed_or(body, product))
    }

    async fn remove(&self, id: &ProductId) -> Result<(), ClientError> {
        self.call(ApiRequest::delete(format!("{BASE}/{id}"))).await?;
        Ok(())
    }
}

/// The stored product as echoed by the backend, or what was sent when the
/// answer carries no product.
fn echoed_or(body: Value, sent: &Product) -> Product {
    serde_json::from_value(body).unwrap_or_else(|_| sent.clone())
}
