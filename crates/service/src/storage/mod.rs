//! Storage abstractions for service layer
//!
//! Contains the reusable file-backed JSON array store shared by the
//! catalog and order stores.

pub mod json_list_store;
