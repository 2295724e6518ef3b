//! Data source abstraction for acquiring the catalog document.

use camino::{Utf8Path, Utf8PathBuf};
use std::io::Read;
use thiserror::Error;

use crate::model::CatalogDoc;

/// Errors that make the catalog unusable. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate system_id '{0}' in catalog")]
    DuplicateId(String),
}

/// Trait for abstracting where the catalog document comes from.
pub trait DataSource {
    /// Human readable origin used in error messages (a path, `"<stdin>"`, ...).
    fn origin(&self) -> String;
    /// Read the whole document as text.
    fn read_document(&mut self) -> std::io::Result<String>;
}

/// Reads the catalog from a file on the local filesystem.
pub struct FsSource {
    path: Utf8PathBuf,
}

impl FsSource {
    pub fn new(path: impl AsRef<Utf8Path>) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }
}

impl DataSource for FsSource {
    fn origin(&self) -> String {
        self.path.to_string()
    }

    fn read_document(&mut self) -> std::io::Result<String> {
        std::fs::read_to_string(self.path.as_std_path())
    }
}

/// Reads the catalog from any reader (stdin, an in-memory buffer, ...).
pub struct ReaderSource<R: Read> {
    name: String,
    reader: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }
}

impl<R: Read> DataSource for ReaderSource<R> {
    fn origin(&self) -> String {
        self.name.clone()
    }

    fn read_document(&mut self) -> std::io::Result<String> {
        let mut s = String::new();
        self.reader.read_to_string(&mut s)?;
        Ok(s)
    }
}

/// Read and parse the catalog document from `source`. No retries.
pub fn read_catalog_doc(source: &mut dyn DataSource) -> Result<CatalogDoc, LoadError> {
    let origin = source.origin();
    let text = source.read_document().map_err(|source| LoadError::Io {
        origin: origin.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json { origin, source })
}
