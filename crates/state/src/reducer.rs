//! Store state and its pure transitions.

use catalog_client::ListQuery;
use catalog_core::{ProductId, without};
use catalog_products::{Product, ProductPage};

/// Where the catalog list stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    /// Last operation failed with a user-facing message.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductsState {
    pub items: Vec<Product>,
    pub total: usize,
    pub query: String,
    /// 1-based.
    pub page: usize,
    pub size: usize,
    pub status: LoadStatus,
}

impl Default for ProductsState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            query: String::new(),
            page: 1,
            size: 10,
            status: LoadStatus::Idle,
        }
    }
}

impl ProductsState {
    pub fn loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn list_query(&self) -> ListQuery {
        ListQuery {
            q: self.query.clone(),
            page: self.page,
            size: self.size,
        }
    }

    /// Items of the current page, slicing `items` client-side.
    pub fn page_slice(&self) -> &[Product] {
        let start = (self.page.saturating_sub(1)).saturating_mul(self.size);
        let end = start.saturating_add(self.size).min(self.items.len());
        self.items.get(start..end).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadStarted,
    Loaded(ProductPage),
    LoadFailed(String),
    QueryChanged(String),
    PageChanged(usize),
    SizeChanged(usize),
    /// Optimistic removal, before the backend answers.
    Removed(ProductId),
    /// Backend refused a removal: restore the pre-removal list.
    RemoveRolledBack {
        items: Vec<Product>,
        total: usize,
        error: String,
    },
}

pub fn reduce(state: &ProductsState, action: Action) -> ProductsState {
    let mut next = state.clone();
    match action {
        Action::LoadStarted => {
            next.status = LoadStatus::Loading;
        }
        Action::Loaded(page) => {
            next.items = page.items;
            next.total = page.total;
            next.status = LoadStatus::Idle;
        }
        Action::LoadFailed(error) => {
            next.items.clear();
            next.total = 0;
            next.status = LoadStatus::Failed(error);
        }
        Action::QueryChanged(query) => {
            next.query = query;
            next.page = 1;
        }
        Action::PageChanged(page) => {
            next.page = page.max(1);
        }
        Action::SizeChanged(size) => {
            next.size = size.max(1);
            next.page = 1;
        }
        Action::Removed(id) => {
            next.items = without(&state.items, &id);
            next.total = next.items.len();
            if matches!(next.status, LoadStatus::Failed(_)) {
                next.status = LoadStatus::Idle;
            }
        }
        Action::RemoveRolledBack { items, total, error } => {
            next.items = items;
            next.total = total;
            next.status = LoadStatus::Failed(error);
        }
    }
    next
}
