use std::{
    marker::PhantomData,
    path::PathBuf,
    sync::Arc,
};
use tokio::{fs, sync::RwLock};
use tracing::{debug, error};

use models::{next_id, Record};

use crate::errors::ServiceError;

/// Generic JSON file-backed list store.
///
/// The file holds one JSON array and is the only source of truth: every call
/// re-reads it in full and every append rewrites it in full. Nothing is cached
/// between calls. The lock serializes appends within the process so two
/// concurrent creates cannot compute the same id and drop each other's record.
pub struct JsonListStore<T> {
    file_path: PathBuf,
    lock: RwLock<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T: Record> JsonListStore<T> {
    /// Initialize the store from a path. Creates the file with an empty array if missing;
    /// an existing file is left untouched.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        common::env::ensure_json_array_file(&file_path)
            .await
            .map_err(|e| ServiceError::write(&file_path, e))?;

        Ok(Arc::new(Self { file_path, lock: RwLock::new(()), _records: PhantomData }))
    }

    /// All records in stored order.
    pub async fn list(&self) -> Result<Vec<T>, ServiceError> {
        let _guard = self.lock.read().await;
        self.read_all().await
    }

    /// Read the file, assign `max(id) + 1` to the record built by `build`,
    /// append it and rewrite the file. The record is returned only once the
    /// rewrite succeeded.
    pub async fn append_with<F>(&self, build: F) -> Result<T, ServiceError>
    where
        F: FnOnce(u64) -> T,
    {
        let _guard = self.lock.write().await;
        let mut records = self.read_all().await?;
        let id = next_id(&records).ok_or_else(|| {
            error!(path = %self.file_path.display(), "no id left above the current maximum");
            ServiceError::write(&self.file_path, "id space exhausted")
        })?;
        let record = build(id);
        records.push(record.clone());
        self.write_all(&records).await?;
        debug!(path = %self.file_path.display(), id = record.id(), total = records.len(), "record appended");
        Ok(record)
    }

    async fn read_all(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = fs::read(&self.file_path).await.map_err(|e| {
            error!(path = %self.file_path.display(), error = %e, "cannot read data file");
            ServiceError::read(&self.file_path, e)
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            error!(path = %self.file_path.display(), error = %e, "data file is not a valid JSON array");
            ServiceError::read(&self.file_path, e)
        })
    }

    async fn write_all(&self, records: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(records).map_err(|e| ServiceError::write(&self.file_path, e))?;
        fs::write(&self.file_path, data).await.map_err(|e| {
            error!(path = %self.file_path.display(), error = %e, "cannot rewrite data file");
            ServiceError::write(&self.file_path, e)
        })
    }
}
