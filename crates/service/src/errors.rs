use std::fmt::Display;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("storage read error: {0}")]
    StorageRead(String),
    #[error("storage write error: {0}")]
    StorageWrite(String),
    #[error("Le produit avec l'ID {0} n'existe pas")]
    UnknownProduct(u64),
}

impl ServiceError {
    pub fn read(path: &Path, cause: impl Display) -> Self {
        Self::StorageRead(format!("{}: {}", path.display(), cause))
    }

    pub fn write(path: &Path, cause: impl Display) -> Self {
        Self::StorageWrite(format!("{}: {}", path.display(), cause))
    }

    /// Whether the failure is the caller's fault rather than the server's.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnknownProduct(_))
    }
}
