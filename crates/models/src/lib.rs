//! Records persisted by the catalog and order stores, plus the request payloads
//! that create them. Field names are camelCase on the wire and on disk.

pub mod order;
pub mod product;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{de::DeserializeOwned, Serialize};

pub use order::{Order, OrderInput, OrderItem, OrderStatus};
pub use product::{Product, ProductInput};

/// A record kept in a JSON array file and keyed by a store-assigned integer id.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> u64;
}

/// Next id for a collection: highest existing id plus one, or 1 when empty.
/// `None` once the id space is exhausted.
pub fn next_id<T: Record>(records: &[T]) -> Option<u64> {
    match records.iter().map(Record::id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// Creation timestamp, truncated to milliseconds so the stored ISO-8601 text
/// and the in-memory value compare equal after a round trip.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// `createdAt` as `YYYY-MM-DDTHH:MM:SS.mmmZ`, always with three fraction digits.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}
