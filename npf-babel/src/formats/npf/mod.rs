//! NPF (Neue Post Format) import
//!
//! Parses a post's JSON into the block tree. The pipeline is:
//!
//! 1. [`model`]: decode the JSON and classify each content block into a
//!    [`SourceBlock`] variant.
//! 2. [`builders`]: build one node per block, resolving formatting ranges into
//!    inline markup where the variant calls for it.
//! 3. [`convert`]: dispatch blocks to builders and group list-item runs into
//!    list containers.
//!
//! The format is import-only; serializing back to NPF is not supported.

pub mod builders;
pub mod convert;
pub mod model;

pub use convert::convert_blocks;
pub use model::{decode_post, decode_post_value, Media, SourceBlock, StyledText};

use crate::common::inline::FormatTags;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::BlockDocument;

/// Format implementation for NPF posts.
#[derive(Debug, Clone, Default)]
pub struct NpfFormat {
    tags: FormatTags,
}

impl NpfFormat {
    /// An NPF parser that renders formatting through `tags`.
    pub fn new(tags: FormatTags) -> Self {
        NpfFormat { tags }
    }

    pub fn tags(&self) -> &FormatTags {
        &self.tags
    }
}

impl Format for NpfFormat {
    fn name(&self) -> &str {
        "npf"
    }

    fn description(&self) -> &str {
        "Tumblr Neue Post Format (post JSON with a content array)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["npf", "json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<BlockDocument, FormatError> {
        let blocks = decode_post(source)?;
        Ok(BlockDocument::new(convert_blocks(&blocks, &self.tags)?))
    }
}
