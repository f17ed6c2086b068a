//! Icon mapping for the tree visualization
//!
//! Each block name maps to a single Unicode character so node kinds can be told
//! apart at a glance. Names outside the table get a neutral circle.

/// Get the Unicode icon for a block name (with or without the `core/` prefix)
pub fn get_icon(block_name: &str) -> &'static str {
    let name = block_name.strip_prefix("core/").unwrap_or(block_name);
    match name {
        "Document" => "⧉",
        "paragraph" => "¶",
        "heading" => "§",
        "quote" => "\"",
        "pullquote" => "❝",
        "list" => "☰",
        "list-item" => "•",
        "image" => "▣",
        "audio" => "♫",
        "separator" => "⎯",
        _ => "○",
    }
}
