//! Core data structures for the block tree.
//!
//! A [`Block`] mirrors the shape the block grammar's own parser produces:
//! a name, a JSON attribute object, child blocks, and the literal markup that
//! surrounds those children. `inner_content` interleaves markup fragments with
//! one `None` per child, so a node can be re-serialized without knowing what
//! kind of block it is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute object carried by a block. Key order is kept for emission but
/// ignored by equality.
pub type Attrs = Map<String, Value>;

/// One node of the target block tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub block_name: String,
    #[serde(default)]
    pub attrs: Attrs,
    #[serde(default)]
    pub inner_blocks: Vec<Block>,
    #[serde(rename = "innerHTML", default)]
    pub inner_html: String,
    #[serde(default)]
    pub inner_content: Vec<Option<String>>,
}

impl Block {
    /// A block without children. Empty markup yields no content fragment at all,
    /// matching what the grammar's parser returns for a void block.
    pub fn leaf(name: impl Into<String>, attrs: Attrs, html: impl Into<String>) -> Self {
        let html = html.into();
        let inner_content = if html.is_empty() {
            Vec::new()
        } else {
            vec![Some(html.clone())]
        };
        Block {
            block_name: name.into(),
            attrs,
            inner_blocks: Vec::new(),
            inner_html: html,
            inner_content,
        }
    }

    /// A block whose children sit between an opening and a closing fragment.
    pub fn container(
        name: impl Into<String>,
        attrs: Attrs,
        open: &str,
        children: Vec<Block>,
        close: &str,
    ) -> Self {
        let mut inner_content = Vec::with_capacity(children.len() + 2);
        inner_content.push(Some(open.to_string()));
        inner_content.extend(children.iter().map(|_| None));
        inner_content.push(Some(close.to_string()));
        Block {
            block_name: name.into(),
            attrs,
            inner_blocks: children,
            inner_html: format!("{open}{close}"),
            inner_content,
        }
    }

    /// Number of child placeholders in `inner_content`.
    pub fn placeholder_count(&self) -> usize {
        self.inner_content.iter().filter(|c| c.is_none()).count()
    }

    /// Whether this node and all of its descendants have exactly one
    /// placeholder per child.
    pub fn is_balanced(&self) -> bool {
        self.placeholder_count() == self.inner_blocks.len()
            && self.inner_blocks.iter().all(Block::is_balanced)
    }
}

/// Ordering kind of a list run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Unordered,
    Ordered,
}

/// An ordered sequence of top-level blocks; the unit every format reads or writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockDocument {
    pub blocks: Vec<Block>,
}

impl BlockDocument {
    pub fn new(blocks: Vec<Block>) -> Self {
        BlockDocument { blocks }
    }
}
