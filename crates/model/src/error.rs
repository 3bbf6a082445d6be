use std::path::PathBuf;

use hitcast_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found at {}", path.display())]
    ArtifactMissing { path: PathBuf },
    #[error("model artifact at {} cannot be decoded: {reason}", path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },
    #[error("artifact features {found:?} do not match expected order {expected:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("malformed dataset: {0}")]
    DatasetMalformed(String),
    #[error("failed to fit ensemble: {0}")]
    Fit(String),
    #[error("failed to encode artifact: {0}")]
    Encode(String),
    #[error("model unavailable ({}): {reason}", path.display())]
    Unavailable { path: PathBuf, reason: String },
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ModelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed<T: Into<String>>(message: T) -> Self {
        Self::DatasetMalformed(message.into())
    }
}
