//! Error types for conversion and format operations

use thiserror::Error;

/// Errors raised while turning an NPF post into a block tree.
///
/// Unrecognized block types and unknown format types are not errors: they
/// fall back to plain paragraphs and untagged text respectively.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The post, page or response could not be decoded (bad JSON, missing or
    /// mistyped fields)
    #[error("malformed input: {message}")]
    Malformed { message: String },

    /// A recognized block lacks a field its builder needs
    #[error("block {index} ({block}) is missing `{field}`")]
    MissingField {
        index: usize,
        block: &'static str,
        field: &'static str,
    },

    /// A node's placeholder count disagrees with its child count
    #[error("block '{block}' has {children} inner blocks but {placeholders} placeholders")]
    Placeholders {
        block: String,
        children: usize,
        placeholders: usize,
    },
}

impl ConvertError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ConvertError::Malformed {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::malformed(err.to_string())
    }
}

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// The NPF conversion itself failed
    #[error(transparent)]
    Conversion(#[from] ConvertError),
}
