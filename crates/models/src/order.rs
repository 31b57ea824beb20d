use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Record;

/// Orders are only ever created; no transition away from `Pending` exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
}

/// One line of an order. Only `productId` is interpreted; every other field
/// the caller sent (quantity, unit price, ...) is kept verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderItem {
    pub fn new(product_id: u64) -> Self {
        Self { product_id, extra: Map::new() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<Value>,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total_amount: Option<Value>,
    pub status: OrderStatus,
    #[serde(with = "crate::iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Record for Order {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Body of `POST /api/orders`. A missing or null `items` means no items.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    #[serde(default)]
    pub customer_name: Option<Value>,
    #[serde(default)]
    pub items: Option<Vec<OrderItem>>,
    #[serde(default)]
    pub total_amount: Option<Value>,
}

impl OrderInput {
    pub fn items(&self) -> &[OrderItem] {
        self.items.as_deref().unwrap_or_default()
    }

    pub fn into_order(self, id: u64, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            customer_name: self.customer_name,
            items: self.items.unwrap_or_default(),
            total_amount: self.total_amount,
            status: OrderStatus::Pending,
            created_at,
        }
    }
}
