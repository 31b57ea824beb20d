//! Service layer: file-backed stores for the product catalog and customer orders.
//! - `storage` holds the generic whole-file JSON array store.
//! - `file` holds the catalog and order stores built on top of it.
//! - `repository` holds the traits the HTTP layer depends on.

pub mod errors;
pub mod file;
pub mod repository;
pub mod runtime;
pub mod storage;
