//! Product list page.

use std::sync::Arc;
use std::time::Instant;

use catalog_client::{ClientError, ProductsBackend};
use catalog_core::{Entity, ProductId};
use catalog_state::{ProductsStore, ProductsView};

use crate::confirm::ConfirmDialog;
use crate::debounce::SearchDebouncer;
use crate::routes::Route;

pub const PAGE_SIZES: [usize; 3] = [5, 10, 20];

/// Stable key for a rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrackKey<Id> {
    Id(Id),
    Index(usize),
}

/// Rows are keyed by entity id; an entity without a usable id falls back to
/// its position.
pub fn track_by<E>(index: usize, item: &E) -> TrackKey<E::Id>
where
    E: Entity,
    E::Id: AsRef<str>,
{
    let id = item.id();
    if id.as_ref().is_empty() {
        TrackKey::Index(index)
    } else {
        TrackKey::Id(id.clone())
    }
}

pub struct ListPage<B> {
    store: Arc<ProductsStore<B>>,
    search: SearchDebouncer,
    confirm: ConfirmDialog<ProductId>,
}

impl<B: ProductsBackend> ListPage<B> {
    pub fn new(store: Arc<ProductsStore<B>>) -> Self {
        Self {
            store,
            search: SearchDebouncer::default(),
            confirm: ConfirmDialog::new(),
        }
    }

    pub fn store(&self) -> &Arc<ProductsStore<B>> {
        &self.store
    }

    pub fn view(&self) -> ProductsView {
        self.store.view()
    }

    pub fn page_sizes(&self) -> &'static [usize] {
        &PAGE_SIZES
    }

    pub async fn init(&self) {
        self.store.load().await;
    }

    pub fn on_search_input(&mut self, value: impl Into<String>, now: Instant) {
        self.search.input(value, now);
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Applies a settled search term. Returns whether a query was sent.
    pub async fn poll_search(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(query) => {
                self.store.set_query(query).await;
                true
            }
            None => false,
        }
    }

    /// Raw select value; anything unparseable falls back to the default size.
    pub async fn on_size_change(&self, raw: &str) {
        let size = raw.trim().parse().unwrap_or(0);
        self.store.set_size(size).await;
    }

    pub async fn on_page_change(&self, page: usize) {
        self.store.set_page(page).await;
    }

    pub fn create_product(&self) -> Route {
        Route::NewProduct
    }

    pub fn edit_product(&self, id: &ProductId) -> Route {
        Route::EditProduct(id.clone())
    }

    pub fn confirm_dialog(&self) -> &ConfirmDialog<ProductId> {
        &self.confirm
    }

    pub fn request_delete(&mut self, id: ProductId) {
        self.confirm.open(id);
    }

    pub fn cancel_delete(&mut self) {
        self.confirm.cancel();
    }

    /// Removes the product awaiting confirmation, if any. Returns whether a
    /// removal was attempted and succeeded.
    pub async fn confirm_delete(&mut self) -> Result<bool, ClientError> {
        let Some(id) = self.confirm.confirm() else {
            return Ok(false);
        };
        self.store.remove(&id).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::FakeBackend;
    use catalog_products::Product;
    use std::time::Duration;

    fn page(n: usize) -> (ListPage<FakeBackend>, Arc<FakeBackend>) {
        let backend = Arc::new(FakeBackend::with_products(n));
        let store = Arc::new(ProductsStore::new(backend.clone()));
        (ListPage::new(store), backend)
    }

    #[tokio::test]
    async fn init_loads_the_list() {
        let (page, _) = page(3);
        page.init().await;
        let view = page.view();
        assert_eq!(view.total, 3);
        assert!(!view.loading);
    }

    #[tokio::test]
    async fn search_is_debounced() {
        let (mut page, backend) = page(0);
        let t0 = Instant::now();

        page.on_search_input("tar", t0);
        assert!(!page.poll_search(t0 + Duration::from_millis(100)).await);
        page.on_search_input("tarjeta", t0 + Duration::from_millis(200));
        assert!(page.poll_search(t0 + Duration::from_millis(600)).await);

        let queries = backend.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].q, "tarjeta");
    }

    #[tokio::test]
    async fn size_select_parses_or_defaults() {
        let (page, backend) = page(0);
        page.on_size_change("20").await;
        page.on_size_change("many").await;
        page.on_page_change(2).await;

        let sizes: Vec<_> = backend.queries().iter().map(|q| (q.size, q.page)).collect();
        assert_eq!(sizes, vec![(20, 1), (10, 1), (10, 2)]);
        assert_eq!(page.page_sizes(), &[5, 10, 20]);
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let (mut page, backend) = page(2);
        page.init().await;
        let id = ProductId::new("p1").unwrap();

        page.request_delete(id.clone());
        assert!(page.confirm_dialog().is_visible());
        page.cancel_delete();
        assert!(!page.confirm_delete().await.unwrap());
        assert!(backend.removed().is_empty());

        page.request_delete(id.clone());
        assert!(page.confirm_delete().await.unwrap());
        assert_eq!(backend.removed(), vec![id]);
        assert_eq!(page.view().total, 1);
        assert!(!page.confirm_dialog().is_visible());
    }

    #[tokio::test]
    async fn failed_delete_restores_row() {
        let (mut page, backend) = page(2);
        page.init().await;
        backend.fail_removals();

        page.request_delete(ProductId::new("p2").unwrap());
        assert!(page.confirm_delete().await.is_err());
        assert_eq!(page.view().total, 2);
        assert_eq!(page.view().error.as_deref(), Some("No se pudo eliminar el producto"));
    }

    #[test]
    fn navigation_targets() {
        let (page, _) = page(0);
        let id = ProductId::new("abc").unwrap();
        assert_eq!(page.create_product(), Route::NewProduct);
        assert_eq!(page.edit_product(&id), Route::EditProduct(id));
    }

    #[test]
    fn rows_track_by_id_then_index() {
        let product = crate::pages::testing::product(4);
        assert_eq!(track_by(0, &product), TrackKey::Id(product.id.clone()));

        let blank: Product = serde_json::from_value(serde_json::json!({
            "id": "", "name": "Sin id", "description": "Producto sin id", "logo": "x",
            "date_release": "2030-01-01", "date_revision": "2031-01-01"
        }))
        .unwrap();
        assert_eq!(track_by(3, &blank), TrackKey::Index(3));
    }
}
