//! Post and page records
//!
//! Maps posts from a posts API response to the fields of a content record:
//! title, body, publication date, status, author and stickiness. The body is
//! the post's `body` string when it has one, and the converted `content`
//! array otherwise.
//!
//! Pages from a pages response map the same way to [`PageRecord`], with the
//! page-only fields: menu position, modification date and slug. A page's
//! status comes from whether it is linked, not from the import defaults.
//!
//! Each post or page is converted on its own; a failing one does not stop the
//! others, and it is up to the caller to skip or report it.

use crate::common::inline::FormatTags;
use crate::error::ConvertError;
use crate::transforms::npf_value_to_blocks;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Values applied to every record of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDefaults {
    pub status: String,
    pub author: u64,
}

impl Default for PostDefaults {
    fn default() -> Self {
        PostDefaults {
            status: "publish".to_string(),
            author: 1,
        }
    }
}

/// A content record ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub title: String,
    pub content: String,
    /// Publication time in UTC, `YYYY-MM-DD HH:MM:SS`; `None` when the post has
    /// no timestamp.
    pub date: Option<String>,
    pub status: String,
    pub author: u64,
    pub sticky: bool,
}

/// A page record ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub title: String,
    pub content: String,
    /// `publish` for pages shown in the blog's navigation, `draft` otherwise.
    pub status: String,
    pub author: u64,
    pub menu_order: i64,
    /// Both taken from `updated_at`; pages carry no creation time.
    pub date: Option<String>,
    pub modified: Option<String>,
    pub slug: Option<String>,
}

/// Builds the record for one post object.
pub fn post_record(
    post: &Value,
    defaults: &PostDefaults,
    tags: &FormatTags,
) -> Result<PostRecord, ConvertError> {
    let fields = post
        .as_object()
        .ok_or_else(|| ConvertError::malformed("post is not a JSON object"))?;

    let title = fields
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let content = match (fields.get("body"), fields.get("content")) {
        (Some(Value::String(body)), _) => body.clone(),
        (_, Some(Value::Array(_))) => npf_value_to_blocks(post, tags)?,
        (_, Some(Value::String(content))) => content.clone(),
        _ => String::new(),
    };

    let date = optional_timestamp(fields.get("timestamp"))?;

    Ok(PostRecord {
        title,
        content,
        date,
        status: defaults.status.clone(),
        author: defaults.author,
        sticky: fields
            .get("is_pinned")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

/// Builds the record for one page object.
///
/// `content` is taken verbatim when it is a string and converted when it is
/// an NPF content array.
pub fn page_record(
    page: &Value,
    defaults: &PostDefaults,
    tags: &FormatTags,
) -> Result<PageRecord, ConvertError> {
    let fields = page
        .as_object()
        .ok_or_else(|| ConvertError::malformed("page is not a JSON object"))?;

    let content = match fields.get("content") {
        Some(Value::String(content)) => content.clone(),
        Some(Value::Array(_)) => npf_value_to_blocks(page, tags)?,
        _ => String::new(),
    };

    let status = match fields.get("show_link").and_then(Value::as_bool) {
        Some(true) => "publish",
        _ => "draft",
    };

    let menu_order = match fields.get("position") {
        None | Some(Value::Null) => 0,
        Some(position) => position.as_i64().ok_or_else(|| {
            ConvertError::malformed(format!("position {position} is not an integer"))
        })?,
    };

    let updated = optional_timestamp(fields.get("updated_at"))?;

    Ok(PageRecord {
        title: fields
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        content,
        status: status.to_string(),
        author: defaults.author,
        menu_order,
        date: updated.clone(),
        modified: updated,
        slug: fields
            .get("path")
            .and_then(Value::as_str)
            .map(slugify)
            .filter(|slug| !slug.is_empty()),
    })
}

/// Lowercases `path` and turns every run of characters other than ASCII
/// letters, digits and `_` into a single `-`, trimmed at both ends.
fn slugify(path: &str) -> String {
    let mut slug = String::with_capacity(path.len());
    for c in path.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

fn optional_timestamp(timestamp: Option<&Value>) -> Result<Option<String>, ConvertError> {
    match timestamp {
        None | Some(Value::Null) => Ok(None),
        Some(timestamp) => format_timestamp(timestamp).map(Some),
    }
}

fn format_timestamp(timestamp: &Value) -> Result<String, ConvertError> {
    let seconds = timestamp
        .as_i64()
        .ok_or_else(|| ConvertError::malformed(format!("timestamp {timestamp} is not an integer")))?;
    let date = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| ConvertError::malformed(format!("timestamp {seconds} is out of range")))?;
    Ok(date.format(DATE_FORMAT).to_string())
}

/// Extracts the post objects from a posts API response
/// (`{"response": {"posts": [...]}}`).
pub fn decode_posts_response(source: &str) -> Result<Vec<Value>, ConvertError> {
    let mut envelope: Value = serde_json::from_str(source)?;
    match envelope.pointer_mut("/response/posts").map(Value::take) {
        Some(Value::Array(posts)) => Ok(posts),
        _ => Err(ConvertError::malformed(
            "expected a `response.posts` array",
        )),
    }
}

/// Decodes a posts response and builds one record per post, in order.
///
/// Only a malformed envelope fails the whole call.
pub fn import_posts(
    source: &str,
    defaults: &PostDefaults,
    tags: &FormatTags,
) -> Result<Vec<Result<PostRecord, ConvertError>>, ConvertError> {
    let posts = decode_posts_response(source)?;
    Ok(posts
        .iter()
        .map(|post| post_record(post, defaults, tags))
        .collect())
}

/// Extracts the page objects from a pages response (`{"pages": [...]}`, also
/// accepted inside a `response` wrapper).
pub fn decode_pages_response(source: &str) -> Result<Vec<Value>, ConvertError> {
    let mut envelope: Value = serde_json::from_str(source)?;
    let pointer = if envelope.get("pages").is_some() {
        "/pages"
    } else {
        "/response/pages"
    };
    match envelope.pointer_mut(pointer).map(Value::take) {
        Some(Value::Array(pages)) => Ok(pages),
        _ => Err(ConvertError::malformed("expected a `pages` array")),
    }
}

/// Decodes a pages response and builds one record per page, in order.
///
/// Only a malformed envelope fails the whole call.
pub fn import_pages(
    source: &str,
    defaults: &PostDefaults,
    tags: &FormatTags,
) -> Result<Vec<Result<PageRecord, ConvertError>>, ConvertError> {
    let pages = decode_pages_response(source)?;
    Ok(pages
        .iter()
        .map(|page| page_record(page, defaults, tags))
        .collect())
}
