use std::path::PathBuf;
use std::sync::Arc;

use models::{timestamp_now, Product, ProductInput};
use tracing::info;

use crate::errors::ServiceError;
use crate::repository::ProductRepository;
use crate::storage::json_list_store::JsonListStore;

/// File-backed product catalog persisted as a JSON array.
#[derive(Clone)]
pub struct CatalogStore {
    store: Arc<JsonListStore<Product>>,
}

impl CatalogStore {
    /// Initialize the store from the given file path. Creates the file if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonListStore::<Product>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    /// List every product in insertion order.
    pub async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.store.list().await
    }

    /// Append a product with the next id and the current timestamp.
    pub async fn create_product(&self, input: ProductInput) -> Result<Product, ServiceError> {
        let created_at = timestamp_now();
        let product = self
            .store
            .append_with(|id| input.into_product(id, created_at))
            .await?;
        info!(product_id = product.id, name = ?product.name, "product created");
        Ok(product)
    }
}

#[async_trait::async_trait]
impl ProductRepository for CatalogStore {
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> { self.list_products().await }
    async fn create_product(&self, input: ProductInput) -> Result<Product, ServiceError> { self.create_product(input).await }
}
