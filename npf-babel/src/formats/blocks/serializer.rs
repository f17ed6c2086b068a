//! Block grammar serializer
//!
//! Writes a block tree as comment-delimited markup:
//!
//! ```text
//! <!-- wp:heading {"level":1} --><h1 class="wp-block-heading">Hi</h1><!-- /wp:heading -->
//! <!-- wp:separator /-->
//! ```
//!
//! Children are written where their placeholder sits in the parent's
//! `inner_content`. A node whose placeholder count differs from its child
//! count is rejected instead of being repaired.

use crate::error::ConvertError;
use crate::ir::nodes::{Attrs, Block};

const CORE_NAMESPACE: &str = "core/";

/// Serializes top-level blocks, concatenated with no separator.
pub fn serialize_blocks(blocks: &[Block]) -> Result<String, ConvertError> {
    let mut out = String::new();
    for block in blocks {
        out.push_str(&serialize_block(block)?);
    }
    Ok(out)
}

/// Serializes one block and its descendants.
pub fn serialize_block(block: &Block) -> Result<String, ConvertError> {
    let content = render_content(block, &serialize_block)?;
    let name = strip_core_namespace(&block.block_name);
    let attrs = if block.attrs.is_empty() {
        String::new()
    } else {
        format!("{} ", encode_attrs(&block.attrs)?)
    };

    if content.is_empty() {
        return Ok(format!("<!-- wp:{name} {attrs}/-->"));
    }
    Ok(format!(
        "<!-- wp:{name} {attrs}-->{content}<!-- /wp:{name} -->"
    ))
}

/// Concatenates a block's markup with each child rendered by `render_child` in
/// place of its placeholder. A block without children yields its `inner_html`.
pub(crate) fn render_content<F>(block: &Block, render_child: &F) -> Result<String, ConvertError>
where
    F: Fn(&Block) -> Result<String, ConvertError>,
{
    let placeholders = block.placeholder_count();
    if placeholders != block.inner_blocks.len() {
        return Err(ConvertError::Placeholders {
            block: block.block_name.clone(),
            children: block.inner_blocks.len(),
            placeholders,
        });
    }
    if block.inner_blocks.is_empty() {
        return Ok(block.inner_html.clone());
    }

    let mut children = block.inner_blocks.iter();
    let mut out = String::new();
    for chunk in &block.inner_content {
        match chunk {
            Some(html) => out.push_str(html),
            None => {
                if let Some(child) = children.next() {
                    out.push_str(&render_child(child)?);
                }
            }
        }
    }
    Ok(out)
}

/// Core blocks are written by their bare name.
pub fn strip_core_namespace(name: &str) -> &str {
    name.strip_prefix(CORE_NAMESPACE).unwrap_or(name)
}

/// Encodes attributes as compact JSON that cannot terminate or confuse the
/// surrounding comment.
///
/// Slashes and non-ASCII characters stay literal. `--`, `<`, `>`, `&` and
/// escaped double quotes are rewritten as `\u` escapes, which still decode to
/// the same JSON value.
pub fn encode_attrs(attrs: &Attrs) -> Result<String, ConvertError> {
    let json = serde_json::to_string(attrs)?;
    let mut out = String::with_capacity(json.len());
    let mut chars = json.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('"') => out.push_str("\\u0022"),
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push('\\'),
            },
            '-' if chars.peek() == Some(&'-') => {
                chars.next();
                out.push_str("\\u002d\\u002d");
            }
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(c),
        }
    }
    Ok(out)
}
