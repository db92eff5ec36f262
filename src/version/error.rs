use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Component not found in manifest: {0}")]
    MissingComponent(String),

    #[error("Invalid {bound} version: {value:?}")]
    InvalidVersion { bound: &'static str, value: String },
}
