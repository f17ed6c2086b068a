//! Block builders: one function per NPF block variant.
//!
//! | Variant    | Block              | Markup                                                       | Newlines  |
//! |------------|--------------------|--------------------------------------------------------------|-----------|
//! | Paragraph  | `core/paragraph`   | `<p>…</p>`                                                   | kept      |
//! | Heading1   | `core/heading`     | `<h1 class="wp-block-heading">…</h1>`, `level: 1`            | kept      |
//! | Heading2   | `core/heading`     | `<h2 class="wp-block-heading">…</h2>` (default level)        | kept      |
//! | Quote      | `core/quote`       | `<blockquote class="wp-block-quote">` + paragraph child      | `<br>`    |
//! | Chat       | `core/quote`       | as quote, `className: "chat"`                                | `<br>`    |
//! | Quirky     | `core/quote`       | as quote, `className: "quirky"`, formatting dropped          | `<br>`    |
//! | Indented   | `core/pullquote`   | `<figure class="wp-block-pullquote"><blockquote><p>…`        | `<br>`    |
//! | ListItem   | `core/list-item`   | `<li>…</li>`, formatting dropped                             | kept      |
//! | Image      | `core/image`       | `<figure class="wp-block-image"><img …></figure>`            |           |
//! | Audio      | `core/audio`       | `<figure class="wp-block-audio"><audio controls …>`          |           |
//! | Fallback   | `core/paragraph`   | `<p>…</p>`                                                   | kept      |
//!
//! Text that skips the inline renderer is still escaped.

use crate::common::escape::{escape_html, newlines_to_breaks};
use crate::common::inline::{render_inline, FormatTags};
use crate::error::ConvertError;
use crate::formats::npf::model::{Media, StyledText};
use crate::ir::nodes::{Attrs, Block};
use serde_json::Value;

fn rendered(text: &StyledText, tags: &FormatTags) -> String {
    render_inline(&text.text, &text.formatting, tags)
}

pub fn paragraph(text: &StyledText, tags: &FormatTags) -> Block {
    paragraph_from_html(&rendered(text, tags))
}

fn paragraph_from_html(html: &str) -> Block {
    Block::leaf("core/paragraph", Attrs::new(), format!("<p>{html}</p>"))
}

pub fn heading(level: u8, text: &StyledText, tags: &FormatTags) -> Block {
    let mut attrs = Attrs::new();
    if level != 2 {
        attrs.insert("level".to_string(), Value::from(level));
    }
    let html = rendered(text, tags);
    Block::leaf(
        "core/heading",
        attrs,
        format!("<h{level} class=\"wp-block-heading\">{html}</h{level}>"),
    )
}

/// Quote, chat and quirky all share this shape; they differ in class name and
/// in whether formatting is rendered.
fn quote_with_class(class_name: Option<&str>, html: &str) -> Block {
    let mut attrs = Attrs::new();
    if let Some(class_name) = class_name {
        attrs.insert("className".to_string(), Value::from(class_name));
    }
    let body = paragraph_from_html(&newlines_to_breaks(html));
    Block::container(
        "core/quote",
        attrs,
        "<blockquote class=\"wp-block-quote\">",
        vec![body],
        "</blockquote>",
    )
}

pub fn quote(text: &StyledText, tags: &FormatTags) -> Block {
    quote_with_class(None, &rendered(text, tags))
}

pub fn chat(text: &StyledText, tags: &FormatTags) -> Block {
    quote_with_class(Some("chat"), &rendered(text, tags))
}

pub fn quirky(text: &StyledText) -> Block {
    quote_with_class(Some("quirky"), &escape_html(&text.text))
}

pub fn indented(text: &StyledText, tags: &FormatTags) -> Block {
    let html = newlines_to_breaks(&rendered(text, tags));
    Block::leaf(
        "core/pullquote",
        Attrs::new(),
        format!("<figure class=\"wp-block-pullquote\"><blockquote><p>{html}</p></blockquote></figure>"),
    )
}

pub fn list_item(text: &StyledText) -> Block {
    Block::leaf(
        "core/list-item",
        Attrs::new(),
        format!("<li>{}</li>", escape_html(&text.text)),
    )
}

fn first_url(index: usize, block: &'static str, media: &[Media]) -> Result<String, ConvertError> {
    media
        .first()
        .and_then(|m| m.url.clone())
        .ok_or(ConvertError::MissingField {
            index,
            block,
            field: "media.url",
        })
}

/// Image block from the first media descriptor. Width and height are optional.
pub fn image(index: usize, media: &[Media]) -> Result<Block, ConvertError> {
    let url = first_url(index, "image", media)?;
    let descriptor = &media[0];

    let mut attrs = Attrs::new();
    attrs.insert("url".to_string(), Value::from(url.as_str()));
    let mut img = format!("<img src=\"{}\"", escape_html(&url));
    if let Some(width) = descriptor.width {
        attrs.insert("width".to_string(), Value::from(width));
        img.push_str(&format!(" width=\"{width}\""));
    }
    if let Some(height) = descriptor.height {
        attrs.insert("height".to_string(), Value::from(height));
        img.push_str(&format!(" height=\"{height}\""));
    }
    img.push('>');

    Ok(Block::leaf(
        "core/image",
        attrs,
        format!("<figure class=\"wp-block-image\">{img}</figure>"),
    ))
}

/// Audio block from the first media descriptor, or the block's own `url`.
pub fn audio(index: usize, media: &[Media], url: Option<&str>) -> Result<Block, ConvertError> {
    let src = match first_url(index, "audio", media) {
        Ok(src) => src,
        Err(err) => url.map(str::to_string).ok_or(err)?,
    };

    let mut attrs = Attrs::new();
    attrs.insert("src".to_string(), Value::from(src.as_str()));
    Ok(Block::leaf(
        "core/audio",
        attrs,
        format!(
            "<figure class=\"wp-block-audio\"><audio controls src=\"{}\"></audio></figure>",
            escape_html(&src)
        ),
    ))
}
