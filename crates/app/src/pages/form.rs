//! Create/edit product page.
//!
//! The form sits behind an async mutex so a submit issued while a logo upload
//! is still running can be observed and refused.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::{Mutex, MutexGuard};

use catalog_client::{ClientError, ProductsBackend};
use catalog_core::{DomainError, ProductId};
use catalog_products::{FormErrors, IdVerifier, Product, ProductForm};
use catalog_state::ProductsStore;
use catalog_storage::{ObjectStore, UploadFile, UploadService};

use crate::routes::Route;

/// Uniqueness checks answered by the products backend.
pub struct BackendVerifier<B>(pub Arc<B>);

#[async_trait]
impl<B: ProductsBackend> IdVerifier for BackendVerifier<B> {
    type Error = ClientError;

    async fn id_exists(&self, id: &ProductId) -> Result<bool, ClientError> {
        self.0.verify_id(id).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("form is invalid: {0}")]
    Invalid(FormErrors),
    #[error("a logo upload is still in progress")]
    Uploading,
    #[error("product id is already taken")]
    IdTaken,
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Client(#[from] ClientError),
}

pub struct FormPage<B, S> {
    store: Arc<ProductsStore<B>>,
    uploads: Arc<UploadService<S>>,
    form: Mutex<ProductForm>,
    uploading: AtomicBool,
}

impl<B, S> FormPage<B, S>
where
    B: ProductsBackend,
    S: ObjectStore,
{
    /// Page for a new product.
    pub fn create(store: Arc<ProductsStore<B>>, uploads: Arc<UploadService<S>>) -> Self {
        Self::with_form(store, uploads, ProductForm::for_create())
    }

    /// Page for an existing product, patched with its current values.
    pub async fn edit(
        store: Arc<ProductsStore<B>>,
        uploads: Arc<UploadService<S>>,
        id: &ProductId,
    ) -> Result<Self, ClientError> {
        let product = store.backend().get(id).await?;
        Ok(Self::with_form(store, uploads, ProductForm::for_edit(&product)))
    }

    fn with_form(store: Arc<ProductsStore<B>>, uploads: Arc<UploadService<S>>, form: ProductForm) -> Self {
        Self {
            store,
            uploads,
            form: Mutex::new(form),
            uploading: AtomicBool::new(false),
        }
    }

    pub async fn form(&self) -> MutexGuard<'_, ProductForm> {
        self.form.lock().await
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.load(Ordering::SeqCst)
    }

    /// Uploads the chosen logo and points the form at it.
    ///
    /// Upload failures are only logged; the form keeps its previous logo.
    pub async fn on_file_selected(&self, file: Option<UploadFile>) {
        let Some(file) = file else {
            return;
        };

        self.uploading.store(true, Ordering::SeqCst);
        let name = file.name.clone();
        match self.uploads.upload(file).await {
            Ok(url) => self.form.lock().await.set_logo(url),
            Err(err) => tracing::error!(%err, file = %name, "logo upload failed"),
        }
        self.uploading.store(false, Ordering::SeqCst);
    }

    /// Validates, checks id uniqueness for new products, then creates or
    /// updates. On success the list is reloaded and the list route returned.
    pub async fn submit(&self, today: NaiveDate) -> Result<Route, SubmitError> {
        if self.is_uploading() {
            return Err(SubmitError::Uploading);
        }

        let mut form = self.form.lock().await;
        form.validate(today).map_err(SubmitError::Invalid)?;

        let backend = self.store.backend();
        if !form.is_edit() {
            let verifier = BackendVerifier(Arc::clone(backend));
            if !form.check_id_available(&verifier).await? {
                return Err(SubmitError::IdTaken);
            }
        }

        let product: Product = form.to_product()?;
        if form.is_edit() {
            backend.update(&product.id, &product).await?;
            tracing::info!(id = %product.id, "product updated");
        } else {
            backend.create(&product).await?;
            tracing::info!(id = %product.id, "product created");
        }
        drop(form);

        self.store.load().await;
        Ok(Route::Products)
    }

    /// Clears a new-product form; edit forms are left untouched.
    pub async fn reset(&self) {
        self.form.lock().await.reset();
    }

    pub fn go_back(&self) -> Route {
        Route::Products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::{FakeBackend, product};
    use catalog_products::{Field, FieldError};
    use catalog_storage::{StorageConfig, StoreError};
    use tokio::sync::Notify;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[derive(Default)]
    struct GatedStore {
        gate: Option<Arc<Notify>>,
        fail: bool,
    }

    #[async_trait]
    impl ObjectStore for GatedStore {
        async fn put(&self, _key: &str, _content_type: &str, _bytes: Vec<u8>) -> Result<(), StoreError> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail {
                return Err(StoreError::Network("connection reset".into()));
            }
            Ok(())
        }
    }

    type Page = FormPage<FakeBackend, GatedStore>;

    fn parts(n: usize, store: GatedStore) -> (Arc<ProductsStore<FakeBackend>>, Arc<UploadService<GatedStore>>, Arc<FakeBackend>) {
        let backend = Arc::new(FakeBackend::with_products(n));
        let config = StorageConfig {
            public_base_url: "https://cdn.example.com".into(),
            ..StorageConfig::default()
        };
        (
            Arc::new(ProductsStore::new(backend.clone())),
            Arc::new(UploadService::new(config, store)),
            backend,
        )
    }

    fn create_page(n: usize) -> (Page, Arc<FakeBackend>) {
        let (store, uploads, backend) = parts(n, GatedStore::default());
        (FormPage::create(store, uploads), backend)
    }

    async fn fill(page: &Page) {
        let mut form = page.form().await;
        form.set_name("Tarjeta Oro");
        form.set_description("Tarjeta de crédito con beneficios");
        form.set_logo("https://cdn.example.com/oro.png");
        form.set_date_release("2027-01-15");
    }

    fn png() -> UploadFile {
        UploadFile::new("oro.png", "image/png", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn invalid_form_is_not_submitted() {
        let (page, backend) = create_page(0);

        let err = page.submit(today()).await.unwrap_err();

        let SubmitError::Invalid(errors) = err else { panic!("expected invalid form") };
        assert_eq!(errors.get(Field::Name), Some(&FieldError::Required));
        assert!(backend.verified().is_empty());
        assert!(backend.created().is_empty());
    }

    #[tokio::test]
    async fn create_checks_uniqueness_then_reloads() {
        let (page, backend) = create_page(1);
        fill(&page).await;

        let route = page.submit(today()).await.unwrap();

        assert_eq!(route, Route::Products);
        let created = backend.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].date_revision, NaiveDate::from_ymd_opt(2028, 1, 15).unwrap());
        assert_eq!(backend.verified(), vec![created[0].id.clone()]);
        assert_eq!(backend.queries().len(), 1, "list reloaded after save");
    }

    #[tokio::test]
    async fn taken_id_blocks_creation() {
        let (page, backend) = create_page(0);
        fill(&page).await;
        let id = ProductId::new(page.form().await.value(Field::Id)).unwrap();
        let mut clash = product(9);
        clash.id = id;
        backend.create(&clash).await.unwrap();

        let err = page.submit(today()).await.unwrap_err();

        assert!(matches!(err, SubmitError::IdTaken));
        assert_eq!(page.form().await.errors(today()).get(Field::Id), Some(&FieldError::IdTaken));
        assert_eq!(backend.created(), vec![clash]);
    }

    #[tokio::test]
    async fn edit_patches_and_updates_without_verification() {
        let (store, uploads, backend) = parts(2, GatedStore::default());
        let id = ProductId::new("p2").unwrap();
        let page = FormPage::edit(store, uploads, &id).await.unwrap();

        {
            let mut form = page.form().await;
            assert!(form.is_edit());
            assert_eq!(form.value(Field::Name), "Producto 2");
            form.set_name("Producto renombrado");
        }
        page.reset().await;
        assert_eq!(page.form().await.value(Field::Name), "Producto renombrado");

        page.submit(today()).await.unwrap();

        assert!(backend.verified().is_empty());
        assert_eq!(backend.updated()[0].name, "Producto renombrado");
    }

    #[tokio::test]
    async fn edit_of_missing_product_fails() {
        let (store, uploads, _) = parts(0, GatedStore::default());
        let result = FormPage::edit(store, uploads, &ProductId::new("ghost").unwrap()).await;
        assert_eq!(result.err().and_then(|e| e.status()), Some(404));
    }

    #[tokio::test]
    async fn backend_rejection_is_returned() {
        let (page, backend) = create_page(0);
        fill(&page).await;
        backend.fail_writes();

        let err = page.submit(today()).await.unwrap_err();

        assert!(matches!(err, SubmitError::Client(ref e) if e.status() == Some(400)));
        assert!(backend.queries().is_empty());
    }

    #[tokio::test]
    async fn upload_sets_logo_and_preview() {
        let (page, _) = create_page(0);

        page.on_file_selected(Some(png())).await;
        page.on_file_selected(None).await;

        let form = page.form().await;
        let logo = form.logo_preview().unwrap();
        assert!(logo.starts_with("https://cdn.example.com/products/"));
        assert!(logo.ends_with("-oro.png"));
        assert!(!page.is_uploading());
    }

    #[tokio::test]
    async fn failed_upload_keeps_previous_logo() {
        let (store, uploads, _) = parts(0, GatedStore { fail: true, ..GatedStore::default() });
        let page = FormPage::create(store, uploads);
        page.form().await.set_logo("https://cdn.example.com/old.png");

        page.on_file_selected(Some(png())).await;

        assert_eq!(page.form().await.value(Field::Logo), "https://cdn.example.com/old.png");
        assert!(!page.is_uploading());
    }

    #[tokio::test]
    async fn submit_during_upload_is_refused() {
        let gate = Arc::new(Notify::new());
        let (store, uploads, backend) = parts(0, GatedStore { gate: Some(gate.clone()), fail: false });
        let page = FormPage::create(store, uploads);
        fill(&page).await;

        let ((), refused) = tokio::join!(page.on_file_selected(Some(png())), async {
            let refused = page.submit(today()).await;
            gate.notify_one();
            refused
        });

        assert!(matches!(refused, Err(SubmitError::Uploading)));
        assert!(backend.created().is_empty());
        page.submit(today()).await.unwrap();
        assert_eq!(backend.created().len(), 1);
    }

    #[tokio::test]
    async fn reset_clears_a_new_product_form() {
        let (page, _) = create_page(0);
        fill(&page).await;
        let old_id = page.form().await.value(Field::Id).to_string();

        page.reset().await;

        let form = page.form().await;
        assert_ne!(form.value(Field::Id), old_id);
        assert_eq!(form.value(Field::DateRevision), "");
        assert_eq!(form.logo_preview(), None);
        assert_eq!(page.go_back(), Route::Products);
    }
}
