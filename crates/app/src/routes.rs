//! Navigation targets.

use std::fmt;

use catalog_core::ProductId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Products,
    NewProduct,
    EditProduct(ProductId),
}

impl Route {
    /// Empty and unknown paths redirect to the product list.
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path
            .trim()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            ["products", "new"] => Route::NewProduct,
            ["products", id] => ProductId::new(*id)
                .map(Route::EditProduct)
                .unwrap_or(Route::Products),
            _ => Route::Products,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Products => "/products".to_string(),
            Route::NewProduct => "/products/new".to_string(),
            Route::EditProduct(id) => format!("/products/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
