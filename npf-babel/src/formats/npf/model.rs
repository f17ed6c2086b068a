//! NPF post model.
//!
//! Decoding happens in two steps. The JSON is first read into permissive
//! `Raw*` structs that accept whatever a post may contain (unknown block types,
//! missing optional fields, media given as an object or an array). Each raw
//! block is then classified into a closed [`SourceBlock`] variant; this is the
//! only place that looks at `type`/`subtype` strings.

use crate::error::ConvertError;
use crate::ir::inline::FormatRange;
use crate::ir::nodes::ListKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct RawPost {
    pub content: Vec<RawBlock>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawBlock {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub subtype: Option<String>,
    pub text: Option<String>,
    pub content: Option<Value>,
    pub formatting: Option<Vec<FormatRange>>,
    pub media: Option<RawMedia>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawMedia {
    Many(Vec<Media>),
    One(Media),
}

impl RawMedia {
    fn into_vec(self) -> Vec<Media> {
        match self {
            RawMedia::Many(media) => media,
            RawMedia::One(media) => vec![media],
        }
    }
}

/// A media descriptor attached to an image or audio block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub url: Option<String>,
    pub width: Option<u64>,
    pub height: Option<u64>,
}

/// Block text together with its formatting ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyledText {
    pub text: String,
    pub formatting: Vec<FormatRange>,
}

impl StyledText {
    pub fn plain(text: impl Into<String>) -> Self {
        StyledText {
            text: text.into(),
            formatting: Vec::new(),
        }
    }

    pub fn with_formatting(text: impl Into<String>, formatting: Vec<FormatRange>) -> Self {
        StyledText {
            text: text.into(),
            formatting,
        }
    }
}

/// One NPF content block, classified by the builder that will handle it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum SourceBlock {
    Paragraph(StyledText),
    Heading1(StyledText),
    Heading2(StyledText),
    Quote(StyledText),
    Chat(StyledText),
    Quirky(StyledText),
    Indented(StyledText),
    ListItem {
        kind: ListKind,
        text: StyledText,
    },
    Image {
        media: Vec<Media>,
    },
    Audio {
        media: Vec<Media>,
        url: Option<String>,
    },
    /// Any block type the converter does not know; rendered as a paragraph.
    Fallback {
        kind: String,
        text: StyledText,
    },
}

impl SourceBlock {
    /// Classifies a raw block. Only a text block without `text` is rejected
    /// here; media checks belong to the media builders.
    pub(crate) fn from_raw(index: usize, raw: RawBlock) -> Result<Self, ConvertError> {
        let formatting = raw.formatting.unwrap_or_default();
        let kind = raw.kind.unwrap_or_default();

        let block = match kind.as_str() {
            "text" => {
                let text = raw.text.ok_or(ConvertError::MissingField {
                    index,
                    block: "text",
                    field: "text",
                })?;
                let text = StyledText::with_formatting(text, formatting);
                match raw.subtype.as_deref() {
                    Some("heading1") => SourceBlock::Heading1(text),
                    Some("heading2") => SourceBlock::Heading2(text),
                    Some("quote") => SourceBlock::Quote(text),
                    Some("chat") => SourceBlock::Chat(text),
                    Some("quirky") => SourceBlock::Quirky(text),
                    Some("indented") => SourceBlock::Indented(text),
                    Some("unordered-list-item") => SourceBlock::ListItem {
                        kind: ListKind::Unordered,
                        text,
                    },
                    Some("ordered-list-item") => SourceBlock::ListItem {
                        kind: ListKind::Ordered,
                        text,
                    },
                    _ => SourceBlock::Paragraph(text),
                }
            }
            "image" => SourceBlock::Image {
                media: raw.media.map(RawMedia::into_vec).unwrap_or_default(),
            },
            "audio" => SourceBlock::Audio {
                media: raw.media.map(RawMedia::into_vec).unwrap_or_default(),
                url: raw.url,
            },
            _ => {
                let text = raw
                    .content
                    .as_ref()
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .or(raw.text)
                    .unwrap_or_default();
                SourceBlock::Fallback {
                    kind,
                    text: StyledText::with_formatting(text, formatting),
                }
            }
        };
        Ok(block)
    }

    /// The styled text a block carries, if any.
    pub fn styled_text(&self) -> Option<&StyledText> {
        match self {
            SourceBlock::Paragraph(text)
            | SourceBlock::Heading1(text)
            | SourceBlock::Heading2(text)
            | SourceBlock::Quote(text)
            | SourceBlock::Chat(text)
            | SourceBlock::Quirky(text)
            | SourceBlock::Indented(text) => Some(text),
            SourceBlock::ListItem { text, .. } | SourceBlock::Fallback { text, .. } => Some(text),
            SourceBlock::Image { .. } | SourceBlock::Audio { .. } => None,
        }
    }
}

/// Decodes a post's JSON and classifies its content blocks.
pub fn decode_post(source: &str) -> Result<Vec<SourceBlock>, ConvertError> {
    let raw: RawPost = serde_json::from_str(source)?;
    classify(raw)
}

/// Same as [`decode_post`] for a post that is already parsed.
pub fn decode_post_value(post: &Value) -> Result<Vec<SourceBlock>, ConvertError> {
    let raw = RawPost::deserialize(post)?;
    classify(raw)
}

fn classify(raw: RawPost) -> Result<Vec<SourceBlock>, ConvertError> {
    raw.content
        .into_iter()
        .enumerate()
        .map(|(index, block)| SourceBlock::from_raw(index, block))
        .collect()
}
