pub mod catalog_store;
pub mod order_store;
