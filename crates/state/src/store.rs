//! The products store.
//!
//! One instance per application. State lives in a `watch` channel so any
//! number of views observe each transition, including the optimistic ones.

use std::sync::Arc;

use tokio::sync::watch;

use catalog_client::{ClientError, ProductsBackend};
use catalog_core::ProductId;

use crate::reducer::{Action, ProductsState, reduce};
use crate::view::ProductsView;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const LOAD_FAILED: &str = "No se pudo cargar la lista";
pub const REMOVE_FAILED: &str = "No se pudo eliminar el producto";

pub struct ProductsStore<B> {
    backend: Arc<B>,
    state: watch::Sender<ProductsState>,
}

impl<B: ProductsBackend> ProductsStore<B> {
    pub fn new(backend: Arc<B>) -> Self {
        let (state, _) = watch::channel(ProductsState::default());
        Self { backend, state }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn snapshot(&self) -> ProductsState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProductsState> {
        self.state.subscribe()
    }

    pub fn view(&self) -> ProductsView {
        ProductsView::from_state(&self.state.borrow())
    }

    fn dispatch(&self, action: Action) {
        tracing::trace!(?action, "store action");
        self.state.send_modify(|state| *state = reduce(state, action));
    }

    /// Fetch the current query/page/size and replace the item set.
    pub async fn load(&self) {
        let query = self.state.borrow().list_query();
        self.dispatch(Action::LoadStarted);

        match self.backend.list(&query).await {
            Ok(page) => self.dispatch(Action::Loaded(page)),
            Err(err) => {
                tracing::warn!(%err, q = %query.q, page = query.page, "failed to load products");
                self.dispatch(Action::LoadFailed(LOAD_FAILED.to_string()));
            }
        }
    }

    pub async fn set_query(&self, query: impl Into<String>) {
        self.dispatch(Action::QueryChanged(query.into()));
        self.load().await;
    }

    pub async fn set_page(&self, page: usize) {
        self.dispatch(Action::PageChanged(page));
        self.load().await;
    }

    /// A size of 0 falls back to [`DEFAULT_PAGE_SIZE`].
    pub async fn set_size(&self, size: usize) {
        let size = if size == 0 { DEFAULT_PAGE_SIZE } else { size };
        self.dispatch(Action::SizeChanged(size));
        self.load().await;
    }

    /// Optimistically drop `id` from the list, then ask the backend.
    ///
    /// On failure the pre-removal list comes back and the error is set; the
    /// backend error is returned as well. On success, emptying the current
    /// page moves back one page.
    pub async fn remove(&self, id: &ProductId) -> Result<(), ClientError> {
        let before = self.snapshot();
        self.dispatch(Action::Removed(id.clone()));

        let go_back = {
            let after = self.state.borrow();
            after.page > 1 && after.page_slice().is_empty()
        };

        match self.backend.remove(id).await {
            Ok(()) => {
                tracing::info!(%id, "product removed");
                if go_back {
                    self.set_page(before.page - 1).await;
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%id, %err, "removal failed, restoring list");
                self.dispatch(Action::RemoveRolledBack {
                    items: before.items,
                    total: before.total,
                    error: REMOVE_FAILED.to_string(),
                });
                Err(err)
            }
        }
    }
}
