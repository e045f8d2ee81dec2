//! Load/save boundary between the engine and the backing file.
//!
//! The engine only ever sees a [`Document`]; callers pick a store.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::types::Document;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write document {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where documents come from and go back to.
pub trait DocumentStore {
    /// Load the document at `path`.
    ///
    /// # Errors
    /// Returns [`DocumentError::Read`] when the backing content is unavailable.
    fn load(&self, path: &Path) -> Result<Document, DocumentError>;

    /// Persist `doc` at `path`.
    ///
    /// # Errors
    /// Returns [`DocumentError::Write`] when the content cannot be stored.
    fn save(&self, path: &Path, doc: &Document) -> Result<(), DocumentError>;
}

/// Plain filesystem store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl DocumentStore for FsStore {
    fn load(&self, path: &Path) -> Result<Document, DocumentError> {
        let text = fs::read_to_string(path)
            .map_err(|source| DocumentError::Read { path: path.to_path_buf(), source })?;
        Ok(Document::parse(&text))
    }

    fn save(&self, path: &Path, doc: &Document) -> Result<(), DocumentError> {
        fs::write(path, doc.render())
            .map_err(|source| DocumentError::Write { path: path.to_path_buf(), source })
    }
}
