//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for parsing and serializing block documents.

use crate::error::FormatError;
use crate::ir::nodes::BlockDocument;

/// Trait for document formats
///
/// Implementors convert between a string representation and a [`BlockDocument`].
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &BlockDocument) -> Result<String, FormatError> {
///         Ok(format!("{} blocks", doc.blocks.len()))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "npf", "blocks", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["blocks"], ["npf", "json"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → BlockDocument)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (BlockDocument → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a BlockDocument
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<BlockDocument, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a BlockDocument into text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &BlockDocument) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
