//! Error types for flatkv
//!
//! Provides a unified error type for all operations.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using FlatError
pub type Result<T> = std::result::Result<T, FlatError>;

/// Unified error type for flatkv operations
#[derive(Debug, Error)]
pub enum FlatError {
    // -------------------------------------------------------------------------
    // Open Errors
    // -------------------------------------------------------------------------
    #[error("failed to open data file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Data Errors
    // -------------------------------------------------------------------------
    #[error(
        "corrupt data at offset {offset}: truncated {field} (needed {needed} bytes, {available} available)"
    )]
    CorruptData {
        /// Byte offset where the truncated field starts
        offset: u64,
        /// Which part of the record was cut short
        field: RecordField,
        /// Bytes the field required
        needed: u64,
        /// Bytes left in the file
        available: u64,
    },

    #[error("{field} of {len} bytes exceeds the 4-byte length prefix")]
    EntryTooLarge { field: RecordField, len: usize },

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("store is closed")]
    Closed,
}

/// The four consecutive fields of an on-disk record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    KeyLength,
    Key,
    ValueLength,
    Value,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordField::KeyLength => "key length",
            RecordField::Key => "key",
            RecordField::ValueLength => "value length",
            RecordField::Value => "value",
        };
        f.write_str(name)
    }
}
