use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Record;

/// Catalog entry as stored in `products.json`. Caller fields keep whatever
/// JSON value was sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(with = "crate::iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Record for Product {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Body of `POST /api/products`. Values are taken as supplied; any `id` or
/// `createdAt` sent by the client is ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
}

impl ProductInput {
    pub fn into_product(self, id: u64, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
            created_at,
        }
    }
}
