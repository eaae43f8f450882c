//! What the list page renders: the store state filtered by the search query.

use catalog_products::Product;

use crate::reducer::ProductsState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductsView {
    /// Items matching the query.
    pub items: Vec<Product>,
    /// Number of matching items.
    pub total: usize,
    pub query: String,
    pub page: usize,
    pub size: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProductsView {
    pub fn from_state(state: &ProductsState) -> Self {
        let needle = state.query.trim().to_lowercase();
        let items: Vec<Product> = state
            .items
            .iter()
            .filter(|product| product.matches(&needle))
            .cloned()
            .collect();

        Self {
            total: items.len(),
            items,
            query: state.query.clone(),
            page: state.page,
            size: state.size,
            loading: state.loading(),
            error: state.error().map(str::to_string),
        }
    }

    /// Matching items on the current page.
    pub fn page_items(&self) -> &[Product] {
        let start = self.page.saturating_sub(1).saturating_mul(self.size);
        let end = start.saturating_add(self.size).min(self.items.len());
        self.items.get(start..end).unwrap_or(&[])
    }

    pub fn page_count(&self) -> usize {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(self.size)
    }
}
