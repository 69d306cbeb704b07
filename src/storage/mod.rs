mod file;
mod memory;

pub use file::{
    deserialize_line_from_bytes, export_line_json, import_line_json, serialize_line_to_bytes,
};
pub use memory::MemoryStorage;

use thiserror::Error;
use uuid::Uuid;

use crate::error::SectionError;
use crate::models::{Line, Segment};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("line {0} not found")]
    NotFound(Uuid),

    #[error("invalid line payload: too small")]
    TooSmall,

    #[error("unsupported line format version: {0}")]
    UnsupportedVersion(u32),

    #[error("failed to serialize line: {0}")]
    Encode(String),

    #[error("failed to parse line: {0}")]
    Decode(String),

    #[error(transparent)]
    Chain(#[from] SectionError),
}

/// Summary of a stored line, without its sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMetadata {
    pub id: Uuid,
    pub name: String,
}

/// Storage trait for line persistence
///
/// Implementations decide how lines are kept; ordering and validation of the
/// sections stay with the chain itself. Each mutating call is one unit of work
/// against a single line.
pub trait Storage {
    /// Save a line, replacing any stored line with the same id
    ///
    /// # Errors
    /// Returns an error if the backend cannot store the line
    fn save_line(&self, line: &Line) -> Result<(), StorageError>;

    /// Load a line by id
    ///
    /// # Errors
    /// Returns `NotFound` if no line has this id
    fn load_line(&self, id: Uuid) -> Result<Line, StorageError>;

    /// Delete a line, returning its sections for disposal
    ///
    /// # Errors
    /// Returns `NotFound` if no line has this id
    fn delete_line(&self, id: Uuid) -> Result<Vec<Segment>, StorageError>;

    /// List all stored lines (metadata only)
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read
    fn list_lines(&self) -> Result<Vec<LineMetadata>, StorageError>;
}
