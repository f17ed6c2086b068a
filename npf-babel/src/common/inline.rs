//! Renders resolved spans as inline markup.
//!
//! Every span is escaped and wrapped in one tag per active format. Which tag a
//! format type maps to, and the order in which tags nest, both come from a
//! [`FormatTags`] table: the first mapping in the table is the outermost tag.
//! Nesting therefore depends only on the set of formats a span carries, never
//! on the order the ranges arrived in.
//!
//! Spans are rendered independently; two neighbouring spans with the same
//! formats still produce two separate runs of tags.

use crate::common::escape::escape_html;
use crate::common::ranges::resolve_spans;
use crate::ir::inline::{FormatRange, ResolvedSpan};
use serde::{Deserialize, Serialize};

/// One entry of the format-type to tag table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMapping {
    #[serde(rename = "type")]
    pub format: String,
    pub tag: String,
}

impl TagMapping {
    pub fn new(format: impl Into<String>, tag: impl Into<String>) -> Self {
        TagMapping {
            format: format.into(),
            tag: tag.into(),
        }
    }
}

/// Ordered mapping from format type to tag name.
///
/// Format types missing from the table render without any tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTags {
    mappings: Vec<TagMapping>,
}

impl FormatTags {
    /// Builds a table from mappings in nesting order. When a format type is
    /// listed twice, the first entry wins.
    pub fn new(mappings: impl IntoIterator<Item = TagMapping>) -> Self {
        let mut deduped: Vec<TagMapping> = Vec::new();
        for mapping in mappings {
            if !deduped.iter().any(|m| m.format == mapping.format) {
                deduped.push(mapping);
            }
        }
        FormatTags { mappings: deduped }
    }

    pub fn mappings(&self) -> &[TagMapping] {
        &self.mappings
    }

    pub fn tag_for(&self, format: &str) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.format == format)
            .map(|m| m.tag.as_str())
    }

    /// Tags that apply to a span, outermost first.
    fn tags_for_span<'t>(&'t self, span: &ResolvedSpan<'_>) -> Vec<&'t str> {
        self.mappings
            .iter()
            .filter(|m| span.has_format(&m.format))
            .map(|m| m.tag.as_str())
            .collect()
    }
}

impl Default for FormatTags {
    fn default() -> Self {
        FormatTags::new([
            TagMapping::new("bold", "strong"),
            TagMapping::new("italic", "em"),
        ])
    }
}

/// Resolves `formatting` over `text` and renders the result.
pub fn render_inline(text: &str, formatting: &[FormatRange], tags: &FormatTags) -> String {
    let spans = resolve_spans(text.chars().count(), formatting);
    render_spans(text, &spans, tags)
}

/// Renders already-resolved spans of `text`. Span offsets are in characters.
pub fn render_spans(text: &str, spans: &[ResolvedSpan<'_>], tags: &FormatTags) -> String {
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let byte_at = |chars: usize| offsets[chars.min(offsets.len() - 1)];

    let mut out = String::with_capacity(text.len());
    for span in spans {
        let slice = &text[byte_at(span.start)..byte_at(span.end)];
        if slice.is_empty() {
            continue;
        }

        let span_tags = tags.tags_for_span(span);
        for tag in &span_tags {
            out.push('<');
            out.push_str(tag);
            out.push('>');
        }
        out.push_str(&escape_html(slice));
        for tag in span_tags.iter().rev() {
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
    out
}
