//! In-memory backend shared by the page tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use catalog_client::{ClientError, HttpFailure, ListQuery, ProductsBackend};
use catalog_core::ProductId;
use catalog_products::{Product, ProductPage};

pub fn product(n: usize) -> Product {
    Product::new(
        ProductId::new(format!("p{n}")).unwrap(),
        format!("Producto {n}"),
        "Producto bancario de prueba",
        format!("https://cdn.example.com/p{n}.png"),
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
    )
    .unwrap()
}

fn failure(status: u16) -> ClientError {
    ClientError::Http(HttpFailure::new(status, "boom", None))
}

#[derive(Default)]
pub struct FakeBackend {
    products: Mutex<Vec<Product>>,
    queries: Mutex<Vec<ListQuery>>,
    created: Mutex<Vec<Product>>,
    updated: Mutex<Vec<Product>>,
    removed: Mutex<Vec<ProductId>>,
    verified: Mutex<Vec<ProductId>>,
    fail_remove: AtomicBool,
    fail_write: AtomicBool,
}

impl FakeBackend {
    pub fn with_products(n: usize) -> Self {
        Self {
            products: Mutex::new((1..=n).map(product).collect()),
            ..Self::default()
        }
    }

    pub fn fail_removals(&self) {
        self.fail_remove.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_write.store(true, Ordering::SeqCst);
    }

    pub fn queries(&self) -> Vec<ListQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<Product> {
        self.created.lock().unwrap().clone()
    }

    pub fn updated(&self) -> Vec<Product> {
        self.updated.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<ProductId> {
        self.removed.lock().unwrap().clone()
    }

    pub fn verified(&self) -> Vec<ProductId> {
        self.verified.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductsBackend for FakeBackend {
    async fn list(&self, query: &ListQuery) -> Result<ProductPage, ClientError> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(ProductPage::new(self.products.lock().unwrap().clone()))
    }

    async fn get(&self, id: &ProductId) -> Result<Product, ClientError> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| failure(404))
    }

    async fn verify_id(&self, id: &ProductId) -> Result<bool, ClientError> {
        self.verified.lock().unwrap().push(id.clone());
        Ok(self.products.lock().unwrap().iter().any(|p| &p.id == id))
    }

    async fn create(&self, product: &Product) -> Result<Product, ClientError> {
        if self.fail_write.load(Ordering::SeqCst) {
            return Err(failure(400));
        }
        self.created.lock().unwrap().push(product.clone());
        self.products.lock().unwrap().push(product.clone());
        Ok(product.clone())
    }

    async fn update(&self, id: &ProductId, product: &Product) -> Result<Product, ClientError> {
        if self.fail_write.load(Ordering::SeqCst) {
            return Err(failure(404));
        }
        self.updated.lock().unwrap().push(product.clone());
        let mut products = self.products.lock().unwrap();
        if let Some(slot) = products.iter_mut().find(|p| &p.id == id) {
            *slot = product.clone();
        }
        Ok(product.clone())
    }

    async fn remove(&self, id: &ProductId) -> Result<(), ClientError> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(failure(500));
        }
        self.removed.lock().unwrap().push(id.clone());
        self.products.lock().unwrap().retain(|p| &p.id != id);
        Ok(())
    }
}
