//! HTML format implementation
//!
//! Renders a block tree as the markup a reader would see: every block's
//! `inner_content` with its children substituted at their placeholders, and
//! no block delimiters. The result is an HTML fragment, not a full document.
//!
//! Rendering is lossy (block names and attributes are dropped), so there is no
//! HTML import.

use crate::error::{ConvertError, FormatError};
use crate::format::Format;
use crate::formats::blocks::serializer::render_content;
use crate::ir::nodes::{Block, BlockDocument};

/// Renders one block and its descendants as plain markup.
pub fn render_block(block: &Block) -> Result<String, ConvertError> {
    render_content(block, &render_block)
}

/// Renders top-level blocks, concatenated.
pub fn render_html(doc: &BlockDocument) -> Result<String, FormatError> {
    let mut out = String::new();
    for block in &doc.blocks {
        out.push_str(&render_block(block)?);
    }
    Ok(out)
}

/// Format implementation for HTML
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Rendered HTML fragment without block delimiters"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &BlockDocument) -> Result<String, FormatError> {
        render_html(doc)
    }
}
