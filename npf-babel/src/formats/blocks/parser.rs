//! Block grammar parser
//!
//! Reads comment-delimited block markup back into a block tree. Three kinds of
//! delimiter are recognized:
//!
//! ```text
//! <!-- wp:ns/name {"json":"attrs"} -->   opener
//! <!-- /wp:ns/name -->                    closer
//! <!-- wp:ns/name {"json":"attrs"} /-->   void block
//! ```
//!
//! A name without a namespace belongs to `core/`. Any other comment is treated
//! as literal markup. Markup between the delimiters of an open block becomes a
//! fragment of its `inner_content`, and each nested block leaves a placeholder
//! behind. Only whitespace may appear between top-level blocks.

use crate::error::FormatError;
use crate::ir::nodes::{Attrs, Block};

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DelimiterKind {
    Opener,
    Closer,
    Void,
}

#[derive(Debug)]
struct Delimiter {
    kind: DelimiterKind,
    name: String,
    attrs: Attrs,
    /// Byte offset just past the delimiter's `-->`.
    end: usize,
}

/// A block whose closer has not been seen yet.
#[derive(Debug)]
struct OpenBlock {
    name: String,
    attrs: Attrs,
    inner_blocks: Vec<Block>,
    inner_html: String,
    inner_content: Vec<Option<String>>,
}

impl OpenBlock {
    fn new(name: String, attrs: Attrs) -> Self {
        OpenBlock {
            name,
            attrs,
            inner_blocks: Vec::new(),
            inner_html: String::new(),
            inner_content: Vec::new(),
        }
    }

    fn push_html(&mut self, html: &str) {
        self.inner_html.push_str(html);
        self.inner_content.push(Some(html.to_string()));
    }

    fn push_child(&mut self, child: Block) {
        self.inner_blocks.push(child);
        self.inner_content.push(None);
    }

    fn close(self) -> Block {
        Block {
            block_name: self.name,
            attrs: self.attrs,
            inner_blocks: self.inner_blocks,
            inner_html: self.inner_html,
            inner_content: self.inner_content,
        }
    }
}

/// Parses block markup into top-level blocks.
pub fn parse_blocks(source: &str) -> Result<Vec<Block>, FormatError> {
    let mut output: Vec<Block> = Vec::new();
    let mut stack: Vec<OpenBlock> = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(found) = source[cursor..].find(COMMENT_OPEN) {
        let at = cursor + found;
        let Some(delimiter) = scan_delimiter(source, at)? else {
            cursor = at + COMMENT_OPEN.len();
            continue;
        };

        push_literal(&source[literal_start..at], &mut stack, literal_start)?;
        match delimiter.kind {
            DelimiterKind::Opener => stack.push(OpenBlock::new(delimiter.name, delimiter.attrs)),
            DelimiterKind::Void => {
                let block = Block::leaf(delimiter.name, delimiter.attrs, "");
                attach(block, &mut stack, &mut output);
            }
            DelimiterKind::Closer => {
                let open = stack.pop().ok_or_else(|| {
                    FormatError::ParseError(format!(
                        "closer for '{}' at byte {at} has no matching opener",
                        delimiter.name
                    ))
                })?;
                if open.name != delimiter.name {
                    return Err(FormatError::ParseError(format!(
                        "closer for '{}' at byte {at} does not match open block '{}'",
                        delimiter.name, open.name
                    )));
                }
                attach(open.close(), &mut stack, &mut output);
            }
        }
        cursor = delimiter.end;
        literal_start = delimiter.end;
    }

    push_literal(&source[literal_start..], &mut stack, literal_start)?;
    if let Some(open) = stack.last() {
        return Err(FormatError::ParseError(format!(
            "block '{}' is never closed",
            open.name
        )));
    }
    Ok(output)
}

fn attach(block: Block, stack: &mut [OpenBlock], output: &mut Vec<Block>) {
    match stack.last_mut() {
        Some(parent) => parent.push_child(block),
        None => output.push(block),
    }
}

fn push_literal(text: &str, stack: &mut [OpenBlock], offset: usize) -> Result<(), FormatError> {
    if text.is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(open) => {
            open.push_html(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(FormatError::ParseError(format!(
            "unexpected content outside of any block at byte {offset}"
        ))),
    }
}

/// Tries to read a block delimiter starting at `start`, which points at `<!--`.
///
/// Returns `Ok(None)` for comments that are not block delimiters. A delimiter
/// whose attributes are not a JSON object is an error.
fn scan_delimiter(source: &str, start: usize) -> Result<Option<Delimiter>, FormatError> {
    let rest = &source[start + COMMENT_OPEN.len()..];
    let Some(rest) = skip_required_whitespace(rest) else {
        return Ok(None);
    };

    let (is_closer, rest) = match rest.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    let Some(rest) = rest.strip_prefix("wp:") else {
        return Ok(None);
    };

    let name_len = rest
        .find(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '/')))
        .unwrap_or(rest.len());
    let raw_name = &rest[..name_len];
    if !is_valid_name(raw_name) {
        return Ok(None);
    }
    let Some(rest) = skip_required_whitespace(&rest[name_len..]) else {
        return Ok(None);
    };

    let (attrs_json, rest) = if rest.starts_with('{') {
        match split_attrs(rest) {
            Some(parts) => parts,
            None => return Ok(None),
        }
    } else {
        (None, rest)
    };

    let (is_void, rest) = match rest.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    let Some(after) = rest.strip_prefix(COMMENT_CLOSE) else {
        return Ok(None);
    };

    let name = normalize_name(raw_name);
    let attrs = match attrs_json {
        Some(json) => serde_json::from_str::<Attrs>(json).map_err(|err| {
            FormatError::ParseError(format!("invalid attributes for block '{name}': {err}"))
        })?,
        None => Attrs::new(),
    };
    let kind = match (is_closer, is_void) {
        (true, _) => DelimiterKind::Closer,
        (false, true) => DelimiterKind::Void,
        (false, false) => DelimiterKind::Opener,
    };

    Ok(Some(Delimiter {
        kind,
        name,
        attrs,
        end: source.len() - after.len(),
    }))
}

fn skip_required_whitespace(text: &str) -> Option<&str> {
    let trimmed = text.trim_start();
    (trimmed.len() < text.len()).then_some(trimmed)
}

/// Splits `{...} rest` at the first `}` that is followed by whitespace and the
/// end of the comment.
fn split_attrs(text: &str) -> Option<(Option<&str>, &str)> {
    for (idx, _) in text.match_indices('}') {
        let tail = &text[idx + 1..];
        if let Some(trimmed) = skip_required_whitespace(tail) {
            if trimmed.starts_with(COMMENT_CLOSE) || trimmed.starts_with("/-->") {
                return Some((Some(&text[..=idx]), trimmed));
            }
        }
    }
    None
}

fn is_valid_name(name: &str) -> bool {
    let mut parts = name.split('/');
    let valid_part = |part: &str| part.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, None) => valid_part(name),
        (Some(namespace), Some(name), None) => valid_part(namespace) && valid_part(name),
        _ => false,
    }
}

fn normalize_name(name: &str) -> String {
    if name.contains('/') {
        name.to_string()
    } else {
        format!("core/{name}")
    }
}
