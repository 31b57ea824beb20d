//! Environment/runtime helpers
//!
//! Makes sure the data directory and its JSON array files exist at startup.

use std::io::ErrorKind;
use std::path::Path;

use tracing::info;

/// Create `data_dir` (and parents) if it does not exist yet.
pub async fn ensure_data_dir(data_dir: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
    Ok(())
}

/// Write an empty JSON array to `path` unless the file is already there.
/// Returns `true` when the file was created.
pub async fn ensure_json_array_file(path: &Path) -> anyhow::Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(_) => Ok(false),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            if let Some(parent) = path.parent() {
                ensure_data_dir(parent).await?;
            }
            tokio::fs::write(path, b"[]")
                .await
                .map_err(|e| anyhow::anyhow!("cannot initialize {}: {e}", path.display()))?;
            info!(path = %path.display(), "created empty data file");
            Ok(true)
        }
        Err(e) => Err(anyhow::anyhow!("cannot stat {}: {e}", path.display())),
    }
}
