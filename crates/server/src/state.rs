use std::sync::Arc;

use service::repository::{OrderRepository, ProductRepository};

/// Stores shared by every handler; built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
}
