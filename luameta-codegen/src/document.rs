//! Generated documents and their destinations.

use crate::error::CodegenError;
use luameta_schema::TypeId;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One annotation document, generated for one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Type the document describes.
    pub type_id: TypeId,
    /// Qualified name of the type.
    pub clr_name: String,
    /// Annotation text.
    pub text: String,
}

impl Document {
    /// Creates a new document.
    #[must_use]
    pub fn new(type_id: TypeId, clr_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            type_id,
            clr_name: clr_name.into(),
            text: text.into(),
        }
    }
}

/// Destination for generated documents.
pub trait DocumentSink {
    /// Persists one document.
    ///
    /// # Errors
    /// Returns `CodegenError` if the document cannot be written.
    fn write_document(&mut self, document: &Document) -> Result<(), CodegenError>;
}

/// Sink collecting documents in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Vec<Document>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents written so far.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Consumes the sink, returning its documents.
    #[must_use]
    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }
}

impl DocumentSink for MemorySink {
    fn write_document(&mut self, document: &Document) -> Result<(), CodegenError> {
        self.documents.push(document.clone());
        Ok(())
    }
}

/// Sink writing each document to `<dir>/<sequence>.lua`.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    next: usize,
}

impl DirectorySink {
    /// Creates the sink, creating `dir` if needed.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if the directory cannot be created.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, CodegenError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, next: 0 })
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of documents written.
    #[must_use]
    pub fn written(&self) -> usize {
        self.next
    }
}

impl DocumentSink for DirectorySink {
    fn write_document(&mut self, document: &Document) -> Result<(), CodegenError> {
        let path = self.dir.join(format!("{}.lua", self.next));
        fs::write(&path, &document.text)?;
        debug!(path = %path.display(), type_name = %document.clr_name, "wrote document");
        self.next += 1;
        Ok(())
    }
}
