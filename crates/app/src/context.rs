//! Application wiring: one toast channel, one store, one upload service.

use std::sync::Arc;

use catalog_client::{ClientError, HttpPipeline, ProductsApi, ReqwestTransport};
use catalog_core::ProductId;
use catalog_state::ProductsStore;
use catalog_storage::{HttpObjectStore, UploadService};
use catalog_toast::ToastService;

use crate::config::AppConfig;
use crate::pages::{FormPage, ListPage};

pub type HttpBackend = ProductsApi<ReqwestTransport>;

pub struct Catalog {
    pub config: AppConfig,
    pub toasts: ToastService,
    pub store: Arc<ProductsStore<HttpBackend>>,
    pub uploads: Arc<UploadService<HttpObjectStore>>,
}

impl Catalog {
    pub fn new(config: AppConfig) -> Self {
        let toasts = ToastService::new();

        let mut transport = ReqwestTransport::new(config.api_url.clone());
        let mut object_store = HttpObjectStore::new(config.storage.upload_endpoint.clone());
        if let Some(token) = &config.api_token {
            transport = transport.with_token(token.clone());
            object_store = object_store.with_token(token.clone());
        }

        let api = ProductsApi::new(HttpPipeline::standard(transport, toasts.clone()));
        let store = Arc::new(ProductsStore::new(Arc::new(api)));
        let uploads = Arc::new(UploadService::new(config.storage.clone(), object_store));

        tracing::info!(api_url = %config.api_url, bucket = %config.storage.bucket, "catalog initialized");

        Self {
            config,
            toasts,
            store,
            uploads,
        }
    }

    pub fn list_page(&self) -> ListPage<HttpBackend> {
        ListPage::new(Arc::clone(&self.store))
    }

    pub fn new_product_page(&self) -> FormPage<HttpBackend, HttpObjectStore> {
        FormPage::create(Arc::clone(&self.store), Arc::clone(&self.uploads))
    }

    pub async fn edit_product_page(
        &self,
        id: &ProductId,
    ) -> Result<FormPage<HttpBackend, HttpObjectStore>, ClientError> {
        FormPage::edit(Arc::clone(&self.store), Arc::clone(&self.uploads), id).await
    }
}
