//! Persistence backends.
//!
//! A backend receives a complete [`OntologyDocument`] once its build has
//! finished. Nothing is written for a build that fails.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BackendError;
use crate::model::OntologyDocument;
use crate::serializer::{jsonld, ntriples, turtle};

/// Write-only sink for built ontologies.
pub trait Backend {
    /// Persists `document` at `location`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the document cannot be rendered or
    /// stored.
    fn persist(&mut self, document: &OntologyDocument, location: &Path) -> Result<(), BackendError>;
}

/// On-disk RDF syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle 1.1.
    Turtle,
    /// N-Triples.
    NTriples,
    /// JSON-LD 1.1.
    JsonLd,
}

impl RdfFormat {
    /// Picks a syntax from the file extension. Anything unrecognized,
    /// including `.owl`, is written as Turtle.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("nt") => RdfFormat::NTriples,
            Some("jsonld" | "json") => RdfFormat::JsonLd,
            _ => RdfFormat::Turtle,
        }
    }

    /// Renders `document` in this syntax.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Json`] if JSON-LD rendering fails.
    pub fn render(self, document: &OntologyDocument) -> Result<String, BackendError> {
        Ok(match self {
            RdfFormat::Turtle => turtle::to_turtle(document),
            RdfFormat::NTriples => ntriples::to_ntriples(document),
            RdfFormat::JsonLd => serde_json::to_string_pretty(&jsonld::to_json_ld(document))?,
        })
    }
}

/// Writes each document to the filesystem in the syntax its extension names.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileBackend;

impl FileBackend {
    /// Creates a file backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Backend for FileBackend {
    fn persist(&mut self, document: &OntologyDocument, location: &Path) -> Result<(), BackendError> {
        let format = RdfFormat::from_path(location);
        let content = format.render(document)?;
        if let Some(parent) = location.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(location, content)?;
        debug!(
            iri = %document.iri,
            location = %location.display(),
            ?format,
            "ontology written"
        );
        Ok(())
    }
}

/// Keeps persisted documents in memory, keyed by location.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    documents: BTreeMap<PathBuf, OntologyDocument>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The document last persisted at `location`.
    #[must_use]
    pub fn get(&self, location: impl AsRef<Path>) -> Option<&OntologyDocument> {
        self.documents.get(location.as_ref())
    }

    /// Every persisted document, ordered by location.
    pub fn documents(&self) -> impl Iterator<Item = (&Path, &OntologyDocument)> {
        self.documents.iter().map(|(path, doc)| (path.as_path(), doc))
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if nothing has been persisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Backend for MemoryBackend {
    fn persist(&mut self, document: &OntologyDocument, location: &Path) -> Result<(), BackendError> {
        self.documents.insert(location.to_path_buf(), document.clone());
        Ok(())
    }
}
