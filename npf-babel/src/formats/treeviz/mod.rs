//! Treeviz formatter for block trees
//!
//! A visual, line-based view of the tree: one line per block, nesting drawn
//! with box connectors.
//!
//! <prefix><connector> <icon> <name> [<attrs json>][: <text preview>]
//!
//! The preview is the block's own markup with tags stripped and entities
//! decoded, truncated to 30 characters. Example:
//!
//! ```text
//! ⧉ Document (3 blocks)
//! ├─ § heading {"level":1}: Hello
//! ├─ ☰ list
//! │ ├─ • list-item: first
//! │ └─ • list-item: second
//! └─ " quote {"className":"chat"}
//!   └─ ¶ paragraph: me: hi
//! ```

use super::icons::get_icon;
use crate::common::escape::unescape_html;
use crate::error::FormatError;
use crate::format::Format;
use crate::formats::blocks::serializer::strip_core_namespace;
use crate::ir::nodes::{Block, BlockDocument};
use serde_json::Value;

const PREVIEW_CHARS: usize = 30;

fn format_block(block: &Block, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(&block.block_name),
        label(block)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(&block.inner_blocks, &child_prefix, output);
}

fn format_children(children: &[Block], prefix: &str, output: &mut String) {
    for (i, child) in children.iter().enumerate() {
        format_block(child, prefix, i == children.len() - 1, output);
    }
}

fn label(block: &Block) -> String {
    let mut label = strip_core_namespace(&block.block_name).to_string();
    if !block.attrs.is_empty() {
        label.push(' ');
        label.push_str(&Value::Object(block.attrs.clone()).to_string());
    }
    let preview = text_preview(&block.inner_html);
    if !preview.is_empty() {
        label.push_str(": ");
        label.push_str(&preview);
    }
    label
}

/// Strips tags, turning `<br>` into a space, decodes entities and truncates
/// with an ellipsis.
fn text_preview(html: &str) -> String {
    let mut text = String::new();
    let mut tag = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match (in_tag, c) {
            (false, '<') => {
                in_tag = true;
                tag.clear();
            }
            (true, '>') => {
                in_tag = false;
                if tag.eq_ignore_ascii_case("br") || tag.eq_ignore_ascii_case("br/") {
                    text.push(' ');
                }
            }
            (true, c) => tag.push(c),
            (false, c) => text.push(c),
        }
    }

    let text = unescape_html(&text);
    let text = text.trim();
    if text.chars().count() > PREVIEW_CHARS {
        let cut: String = text.chars().take(PREVIEW_CHARS - 1).collect();
        format!("{cut}…")
    } else {
        text.to_string()
    }
}

pub fn to_treeviz_str(doc: &BlockDocument) -> String {
    let mut output = format!("{} Document ({} blocks)\n", get_icon("Document"), doc.blocks.len());
    format_children(&doc.blocks, "", &mut output);
    output
}

/// Format implementation for treeviz format
#[derive(Debug, Clone, Copy, Default)]
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &BlockDocument) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }
}
