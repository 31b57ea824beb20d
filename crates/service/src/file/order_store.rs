use std::path::PathBuf;
use std::sync::Arc;

use models::{timestamp_now, Order, OrderInput, OrderItem, Product};
use tracing::{info, warn};

use crate::errors::ServiceError;
use crate::repository::{OrderRepository, ProductRepository};
use crate::storage::json_list_store::JsonListStore;

/// File-backed order list persisted as a JSON array. Items are checked
/// against the catalog when an order is created, never afterwards.
#[derive(Clone)]
pub struct OrderStore {
    store: Arc<JsonListStore<Order>>,
    catalog: Arc<dyn ProductRepository>,
}

impl OrderStore {
    /// Initialize the store from the given file path. Creates the file if missing.
    pub async fn new<P: Into<PathBuf>>(
        path: P,
        catalog: Arc<dyn ProductRepository>,
    ) -> Result<Arc<Self>, ServiceError> {
        let store = JsonListStore::<Order>::new(path).await?;
        Ok(Arc::new(Self { store, catalog }))
    }

    /// List every order in insertion order.
    pub async fn list_orders(&self) -> Result<Vec<Order>, ServiceError> {
        self.store.list().await
    }

    /// Validate items against one fresh catalog snapshot, then append the order
    /// as `pending`. Nothing is written when an item is unknown.
    pub async fn create_order(&self, input: OrderInput) -> Result<Order, ServiceError> {
        let catalog = self.catalog.list_products().await?;
        if let Some(missing) = first_unknown_product(&catalog, input.items()) {
            warn!(product_id = missing, "order rejected: unknown product");
            return Err(ServiceError::UnknownProduct(missing));
        }

        let created_at = timestamp_now();
        let order = self
            .store
            .append_with(|id| input.into_order(id, created_at))
            .await?;
        info!(order_id = order.id, items = order.items.len(), "order created");
        Ok(order)
    }
}

/// Linear scan in item order; only the first missing id is reported.
fn first_unknown_product(catalog: &[Product], items: &[OrderItem]) -> Option<u64> {
    items
        .iter()
        .map(|item| item.product_id)
        .find(|id| !catalog.iter().any(|p| p.id == *id))
}

#[async_trait::async_trait]
impl OrderRepository for OrderStore {
    async fn list_orders(&self) -> Result<Vec<Order>, ServiceError> { self.list_orders().await }
    async fn create_order(&self, input: OrderInput) -> Result<Order, ServiceError> { self.create_order(input).await }
}
