//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binary crates can prepare the data
//! directory through `service::runtime` without depending directly on `common`.

use std::path::Path;

/// Ensure the data directory exists.
pub async fn ensure_env(data_dir: &Path) -> anyhow::Result<()> {
    common::env::ensure_data_dir(data_dir).await
}
