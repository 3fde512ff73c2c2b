//! Facts-file error types.

use std::path::PathBuf;

use powermodel_domain::error::PowerModelError;

/// Errors originating from reading a facts document.
#[derive(Debug, thiserror::Error)]
pub enum FactsFileError {
    /// The facts file could not be read.
    #[error("failed to read facts file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML or does not match the facts schema.
    #[error("failed to parse facts document")]
    Parse(#[source] toml::de::Error),
}

impl From<FactsFileError> for PowerModelError {
    fn from(err: FactsFileError) -> Self {
        Self::Source(Box::new(err))
    }
}
