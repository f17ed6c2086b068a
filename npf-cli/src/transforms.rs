//! CLI-specific transforms
//!
//! Each transform is a stage + format combination (e.g., "tree-treeviz",
//! "spans-json"), showing a post at one point of the conversion.
//!
//! ## Transform Pipeline
//!
//! 1. **Decoding** - Post JSON → classified source blocks
//!    - `source-json`: one entry per content block, tagged with its variant
//!
//! 2. **Range resolution** - Formatting ranges → flat spans
//!    - `spans-json`: the spans of every block that carries text
//!
//! 3. **Conversion** - Source blocks → block tree
//!    - `tree-json`: the tree as JSON
//!    - `tree-treeviz`: the tree with Unicode icons

use npf_babel::common::inline::FormatTags;
use npf_babel::common::ranges::resolve_spans;
use npf_babel::formats::npf::{convert_blocks, decode_post, SourceBlock};
use npf_babel::formats::treeviz::to_treeviz_str;
use npf_babel::ir::nodes::BlockDocument;
use serde::Serialize;

/// All available CLI transforms (stage + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] =
    &["source-json", "spans-json", "tree-json", "tree-treeviz"];

/// Transform used by `inspect` when none is named
pub const DEFAULT_TRANSFORM: &str = "tree-treeviz";

#[derive(Debug, Serialize)]
struct BlockSpans<'a> {
    index: usize,
    text: &'a str,
    spans: Vec<SpanView<'a>>,
}

#[derive(Debug, Serialize)]
struct SpanView<'a> {
    start: usize,
    end: usize,
    formats: Vec<&'a str>,
}

/// Execute a named transform on a post
///
/// # Arguments
///
/// * `source` - The post JSON
/// * `transform_name` - The transform to apply (e.g., "tree-treeviz")
/// * `tags` - Tag table used when the transform converts the post
///
/// # Returns
///
/// The transformed output as a string, or an error message
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    tags: &FormatTags,
) -> Result<String, String> {
    let blocks = decode_post(source).map_err(|e| format!("Decoding failed: {e}"))?;

    match transform_name {
        "source-json" => to_json(&blocks),
        "spans-json" => to_json(&spans_of(&blocks)),
        "tree-json" | "tree-treeviz" => {
            let tree = convert_blocks(&blocks, tags).map_err(|e| format!("Conversion failed: {e}"))?;
            let doc = BlockDocument::new(tree);
            if transform_name == "tree-json" {
                to_json(&doc)
            } else {
                Ok(to_treeviz_str(&doc))
            }
        }
        _ => Err(format!(
            "Unknown transform: {transform_name}. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

fn spans_of(blocks: &[SourceBlock]) -> Vec<BlockSpans<'_>> {
    blocks
        .iter()
        .enumerate()
        .filter_map(|(index, block)| {
            let styled = block.styled_text()?;
            let spans = resolve_spans(styled.text.chars().count(), &styled.formatting)
                .into_iter()
                .map(|span| SpanView {
                    start: span.start,
                    end: span.end,
                    formats: span.formats.iter().map(|f| f.kind.as_str()).collect(),
                })
                .collect();
            Some(BlockSpans {
                index,
                text: &styled.text,
                spans,
            })
        })
        .collect()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}
