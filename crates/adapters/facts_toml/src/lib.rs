//! # powermodel-adapter-facts-toml
//!
//! [`FactSource`] backed by a TOML document listing the power consumption
//! facts a reasoner extracted from the ontology.
//!
//! ```toml
//! ontology = "http://elite.polito.it/ontologies/poweront.owl"
//!
//! [[consumption]]
//! device = "LivingRoomLamp"
//! state = "OnState"
//!
//! [[consumption.measurement]]
//! kind = "typical"
//! value = "60"
//! unit = "W"
//! ```
//!
//! `value` and `unit` are both optional. Facts are returned in document order.
//!
//! ## Dependency rule
//!
//! Depends on `powermodel-app` (port traits) and `powermodel-domain` only.

mod document;
mod error;

use std::future::Future;
use std::path::{Path, PathBuf};

use powermodel_app::ports::FactSource;
use powermodel_domain::error::PowerModelError;
use powermodel_domain::fact::RawFact;

pub use error::FactsFileError;

use document::FactsDocument;

/// Where the facts come from.
#[derive(Debug, Clone)]
enum Origin {
    /// Re-read on every load so that a reload picks up edits.
    File(PathBuf),
    Inline(String),
}

/// Fact source reading a TOML facts document.
#[derive(Debug, Clone)]
pub struct TomlFactSource {
    origin: Origin,
}

impl TomlFactSource {
    /// Read facts from the file at `path` on every load.
    #[must_use]
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: Origin::File(path.into()),
        }
    }

    /// Serve facts from an in-memory document.
    #[must_use]
    pub fn from_document(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::Inline(text.into()),
        }
    }

    /// Path of the backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match &self.origin {
            Origin::File(path) => Some(path),
            Origin::Inline(_) => None,
        }
    }

    /// Parse the document and return its ontology label and facts.
    ///
    /// # Errors
    ///
    /// Returns [`FactsFileError::Io`] if the file cannot be read and
    /// [`FactsFileError::Parse`] if it is not a valid facts document.
    pub async fn read(&self) -> Result<(Option<String>, Vec<RawFact>), FactsFileError> {
        let document = match &self.origin {
            Origin::File(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| FactsFileError::Io {
                        path: path.clone(),
                        source,
                    })?;
                FactsDocument::parse(&text)?
            }
            Origin::Inline(text) => FactsDocument::parse(text)?,
        };
        let ontology = document.ontology.clone();
        Ok((ontology, document.into_facts()))
    }
}

impl FactSource for TomlFactSource {
    fn load_facts(&self) -> impl Future<Output = Result<Vec<RawFact>, PowerModelError>> + Send {
        async move {
            let (ontology, facts) = self.read().await?;
            tracing::debug!(
                ontology = ontology.as_deref().unwrap_or("<unnamed>"),
                facts = facts.len(),
                "read consumption facts"
            );
            Ok(facts)
        }
    }
}
