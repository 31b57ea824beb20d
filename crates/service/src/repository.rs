use async_trait::async_trait;
use models::{Order, OrderInput, Product, ProductInput};

use crate::errors::ServiceError;

/// Catalog access. The order store only needs `list_products` to validate items.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError>;
    async fn create_product(&self, input: ProductInput) -> Result<Product, ServiceError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list_orders(&self) -> Result<Vec<Order>, ServiceError>;
    async fn create_order(&self, input: OrderInput) -> Result<Order, ServiceError>;
}
