//! Block dispatcher: runs every source block through its builder and the list
//! grouper, in one pass.

use super::builders;
use super::model::SourceBlock;
use crate::common::inline::FormatTags;
use crate::common::list_grouping::{Built, ListGrouper};
use crate::error::ConvertError;
use crate::ir::nodes::Block;

/// Converts classified source blocks into top-level output nodes.
///
/// Fails on the first block a builder rejects; nothing is returned for the
/// blocks before it.
pub fn convert_blocks(blocks: &[SourceBlock], tags: &FormatTags) -> Result<Vec<Block>, ConvertError> {
    let mut grouper = ListGrouper::new();
    for (index, block) in blocks.iter().enumerate() {
        grouper.push(build(index, block, tags)?);
    }
    Ok(grouper.finish())
}

fn build(index: usize, block: &SourceBlock, tags: &FormatTags) -> Result<Built, ConvertError> {
    let built = match block {
        SourceBlock::Paragraph(text) => Built::Block(builders::paragraph(text, tags)),
        SourceBlock::Heading1(text) => Built::Block(builders::heading(1, text, tags)),
        SourceBlock::Heading2(text) => Built::Block(builders::heading(2, text, tags)),
        SourceBlock::Quote(text) => Built::Block(builders::quote(text, tags)),
        SourceBlock::Chat(text) => Built::Block(builders::chat(text, tags)),
        SourceBlock::Quirky(text) => Built::Block(builders::quirky(text)),
        SourceBlock::Indented(text) => Built::Block(builders::indented(text, tags)),
        SourceBlock::ListItem { kind, text } => Built::ListItem {
            kind: *kind,
            item: builders::list_item(text),
        },
        SourceBlock::Image { media } => Built::Block(builders::image(index, media)?),
        SourceBlock::Audio { media, url } => {
            Built::Block(builders::audio(index, media, url.as_deref())?)
        }
        SourceBlock::Fallback { text, .. } => Built::Block(builders::paragraph(text, tags)),
    };
    Ok(built)
}
