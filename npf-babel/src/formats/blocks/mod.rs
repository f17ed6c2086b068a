//! Block grammar format
//!
//! The comment-delimited serialization used to store block documents as a
//! post body. Both directions are supported, and serializing a parsed
//! document reproduces the input byte for byte when the input was produced by
//! this serializer.

pub mod parser;
pub mod serializer;

pub use parser::parse_blocks;
pub use serializer::{encode_attrs, serialize_block, serialize_blocks, strip_core_namespace};

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::BlockDocument;

/// Format implementation for block grammar markup
#[derive(Debug, Clone, Copy, Default)]
pub struct BlocksFormat;

impl Format for BlocksFormat {
    fn name(&self) -> &str {
        "blocks"
    }

    fn description(&self) -> &str {
        "Block grammar markup (comment-delimited blocks with JSON attributes)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["blocks"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<BlockDocument, FormatError> {
        parse_blocks(source).map(BlockDocument::new)
    }

    fn serialize(&self, doc: &BlockDocument) -> Result<String, FormatError> {
        Ok(serialize_blocks(&doc.blocks)?)
    }
}
