//! Functional entry points for the conversion
//!
//! The registry is the general interface; these functions cover the common
//! case of turning one post straight into block markup, for callers that do
//! not want to go through format names.

use crate::common::inline::FormatTags;
use crate::error::{ConvertError, FormatError};
use crate::formats::blocks::{parse_blocks, serialize_blocks};
use crate::formats::npf::{convert_blocks, decode_post, decode_post_value};
use serde_json::Value;

/// Convert an NPF post (as JSON text) into block markup
///
/// # Example
///
/// ```
/// use npf_babel::common::inline::FormatTags;
/// use npf_babel::transforms::npf_to_blocks;
///
/// let post = r#"{"content":[{"type":"text","text":"Hello"}]}"#;
/// let markup = npf_to_blocks(post, &FormatTags::default()).unwrap();
/// assert_eq!(markup, "<!-- wp:paragraph --><p>Hello</p><!-- /wp:paragraph -->");
/// ```
pub fn npf_to_blocks(source: &str, tags: &FormatTags) -> Result<String, ConvertError> {
    let blocks = decode_post(source)?;
    serialize_blocks(&convert_blocks(&blocks, tags)?)
}

/// Same as [`npf_to_blocks`] for a post that has already been parsed
pub fn npf_value_to_blocks(post: &Value, tags: &FormatTags) -> Result<String, ConvertError> {
    let blocks = decode_post_value(post)?;
    serialize_blocks(&convert_blocks(&blocks, tags)?)
}

/// Round-trip transformation: parse block markup and re-serialize it
///
/// Normalizes delimiter whitespace and attribute encoding.
pub fn normalize_blocks(source: &str) -> Result<String, FormatError> {
    let blocks = parse_blocks(source)?;
    Ok(serialize_blocks(&blocks)?)
}
