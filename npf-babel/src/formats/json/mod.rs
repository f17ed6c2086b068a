//! JSON format for the block tree
//!
//! Uses the shape the block grammar's own parser returns: an array of
//! `{blockName, attrs, innerBlocks, innerHTML, innerContent}` objects, with
//! `null` marking each child's position in `innerContent`. Handy for
//! inspecting a conversion or feeding a tree to another tool.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::BlockDocument;

/// Format implementation for the JSON block tree
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Block tree as JSON (parsed-block shape)"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<BlockDocument, FormatError> {
        let doc: BlockDocument =
            serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))?;
        if let Some(block) = doc.blocks.iter().find(|b| !b.is_balanced()) {
            return Err(FormatError::ParseError(format!(
                "block '{}' (or one of its descendants) has a placeholder count that differs from its child count",
                block.block_name
            )));
        }
        Ok(doc)
    }

    fn serialize(&self, doc: &BlockDocument) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
