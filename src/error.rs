//! Error types for the mailblock library.

use crate::model::SectionId;
use std::io;
use thiserror::Error;

/// Result type alias for mailblock operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while editing, encoding or decoding templates.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A reorder referenced a position outside the section list.
    #[error("Index {index} is out of range (document has {len} sections)")]
    InvalidIndex {
        /// The offending index
        index: usize,
        /// Number of sections at the time of the call
        len: usize,
    },

    /// No section with the given id exists in the document.
    #[error("Section not found: {0}")]
    NotFound(SectionId),

    /// A section id is already used within the document.
    #[error("Duplicate section id: {0}")]
    DuplicateId(SectionId),

    /// The input is not markup the decoder can work with.
    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),

    /// The import file is neither HTML nor a recognised JSON shape.
    #[error("Unknown file format: expected HTML or a JSON template/backup")]
    UnknownFormat,

    /// A document failed a persistence precondition.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The template store reported a failure.
    #[error("Template store error: {0}")]
    Store(String),

    /// No template with the given id exists in the store.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),
}
