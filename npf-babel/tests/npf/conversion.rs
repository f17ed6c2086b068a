//! Post → block markup conversion, checked against the wire format.

use insta::assert_snapshot;
use npf_babel::format::Format;
use npf_babel::formats::blocks::serialize_block;
use npf_babel::formats::npf::NpfFormat;
use npf_babel::formats::treeviz::to_treeviz_str;
use npf_babel::ir::nodes::BlockDocument;
use npf_babel::{npf_to_blocks, ConvertError, FormatTags};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{name}"))
        .unwrap_or_else(|e| panic!("fixture {name} should exist: {e}"))
}

fn convert(source: &str) -> BlockDocument {
    NpfFormat::default().parse(source).unwrap()
}

/// One serialized top-level block per line.
fn wire_lines(doc: &BlockDocument) -> String {
    doc.blocks
        .iter()
        .map(|block| serialize_block(block).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_kitchensink_wire_format() {
    let doc = convert(&fixture("kitchensink.json"));
    assert_eq!(doc.blocks.len(), 13);
    assert!(doc.blocks.iter().all(|b| b.is_balanced()));

    assert_snapshot!(wire_lines(&doc), @r#"
    <!-- wp:heading {"level":1} --><h1 class="wp-block-heading">Big &amp; bold</h1><!-- /wp:heading -->
    <!-- wp:heading --><h2 class="wp-block-heading">Smaller</h2><!-- /wp:heading -->
    <!-- wp:paragraph --><p>Plain with <strong>bold</strong> and <em>italic</em></p><!-- /wp:paragraph -->
    <!-- wp:quote --><blockquote class="wp-block-quote"><!-- wp:paragraph --><p><em>To be</em><br>or not</p><!-- /wp:paragraph --></blockquote><!-- /wp:quote -->
    <!-- wp:quote {"className":"chat"} --><blockquote class="wp-block-quote"><!-- wp:paragraph --><p>a: hi<br>b: hey</p><!-- /wp:paragraph --></blockquote><!-- /wp:quote -->
    <!-- wp:quote {"className":"quirky"} --><blockquote class="wp-block-quote"><!-- wp:paragraph --><p>wEiRd &lt;3</p><!-- /wp:paragraph --></blockquote><!-- /wp:quote -->
    <!-- wp:pullquote --><figure class="wp-block-pullquote"><blockquote><p>indented<br>text</p></blockquote></figure><!-- /wp:pullquote -->
    <!-- wp:list --><ul class="wp-block-list"><!-- wp:list-item --><li>one</li><!-- /wp:list-item --><!-- wp:list-item --><li>two</li><!-- /wp:list-item --></ul><!-- /wp:list -->
    <!-- wp:list {"ordered":true} --><ol class="wp-block-list"><!-- wp:list-item --><li>first</li><!-- /wp:list-item --></ol><!-- /wp:list -->
    <!-- wp:image {"url":"https://64.media.tumblr.com/a.jpg","width":500,"height":375} --><figure class="wp-block-image"><img src="https://64.media.tumblr.com/a.jpg" width="500" height="375"></figure><!-- /wp:image -->
    <!-- wp:list {"ordered":true} --><ol class="wp-block-list"><!-- wp:list-item --><li>second</li><!-- /wp:list-item --></ol><!-- /wp:list -->
    <!-- wp:audio {"src":"https://a.tumblr.com/s.mp3"} --><figure class="wp-block-audio"><audio controls src="https://a.tumblr.com/s.mp3"></audio></figure><!-- /wp:audio -->
    <!-- wp:paragraph --><p>A link</p><!-- /wp:paragraph -->
    "#);
}

#[test]
fn test_kitchensink_tree() {
    let doc = convert(&fixture("kitchensink.json"));
    assert_snapshot!(to_treeviz_str(&doc), @r#"
    ⧉ Document (13 blocks)
    ├─ § heading {"level":1}: Big & bold
    ├─ § heading: Smaller
    ├─ ¶ paragraph: Plain with bold and italic
    ├─ " quote
    │ └─ ¶ paragraph: To be or not
    ├─ " quote {"className":"chat"}
    │ └─ ¶ paragraph: a: hi b: hey
    ├─ " quote {"className":"quirky"}
    │ └─ ¶ paragraph: wEiRd <3
    ├─ ❝ pullquote: indented text
    ├─ ☰ list
    │ ├─ • list-item: one
    │ └─ • list-item: two
    ├─ ☰ list {"ordered":true}
    │ └─ • list-item: first
    ├─ ▣ image {"url":"https://64.media.tumblr.com/a.jpg","width":500,"height":375}
    ├─ ☰ list {"ordered":true}
    │ └─ • list-item: second
    ├─ ♫ audio {"src":"https://a.tumblr.com/s.mp3"}
    └─ ¶ paragraph: A link
    "#);
}

#[test]
fn test_top_level_blocks_are_concatenated() {
    let source = fixture("kitchensink.json");
    let doc = convert(&source);
    let joined: String = doc
        .blocks
        .iter()
        .map(|block| serialize_block(block).unwrap())
        .collect();
    assert_eq!(npf_to_blocks(&source, &FormatTags::default()).unwrap(), joined);
}

#[test]
fn test_adjacent_bold_and_italic() {
    let markup = npf_to_blocks(
        r#"{"content":[{"type":"text","text":"AB","formatting":[
            {"start":0,"end":1,"type":"bold"},
            {"start":1,"end":2,"type":"italic"}
        ]}]}"#,
        &FormatTags::default(),
    )
    .unwrap();
    assert_snapshot!(markup, @"<!-- wp:paragraph --><p><strong>A</strong><em>B</em></p><!-- /wp:paragraph -->");
}

#[test]
fn test_italic_nested_in_bold() {
    let markup = npf_to_blocks(
        r#"{"content":[{"type":"text","text":"AB","formatting":[
            {"start":1,"end":2,"type":"italic"},
            {"start":0,"end":2,"type":"bold"}
        ]}]}"#,
        &FormatTags::default(),
    )
    .unwrap();
    assert_snapshot!(markup, @"<!-- wp:paragraph --><p><strong>A</strong><strong><em>B</em></strong></p><!-- /wp:paragraph -->");
}

#[test]
fn test_list_kind_change_without_separator() {
    let doc = convert(
        r#"{"content":[
            {"type":"text","subtype":"unordered-list-item","text":"x"},
            {"type":"text","subtype":"ordered-list-item","text":"y"}
        ]}"#,
    );
    assert_snapshot!(wire_lines(&doc), @r#"
    <!-- wp:list --><ul class="wp-block-list"><!-- wp:list-item --><li>x</li><!-- /wp:list-item --></ul><!-- /wp:list -->
    <!-- wp:list {"ordered":true} --><ol class="wp-block-list"><!-- wp:list-item --><li>y</li><!-- /wp:list-item --></ol><!-- /wp:list -->
    "#);
}

#[test]
fn test_unrecognized_content_degrades_gracefully() {
    let doc = convert(
        r#"{"content":[
            {"type":"poll","question":"?"},
            {"type":"text","subtype":"mystery","text":"plain"},
            {"type":"text","text":"x","formatting":[{"start":0,"end":1,"type":"color"}]}
        ]}"#,
    );
    assert_snapshot!(wire_lines(&doc), @r#"
    <!-- wp:paragraph --><p></p><!-- /wp:paragraph -->
    <!-- wp:paragraph --><p>plain</p><!-- /wp:paragraph -->
    <!-- wp:paragraph --><p>x</p><!-- /wp:paragraph -->
    "#);
}

#[test]
fn test_image_without_dimensions() {
    let doc = convert(r#"{"content":[{"type":"image","media":{"url":"https://x.test/a.png"}}]}"#);
    assert_snapshot!(wire_lines(&doc), @r#"<!-- wp:image {"url":"https://x.test/a.png"} --><figure class="wp-block-image"><img src="https://x.test/a.png"></figure><!-- /wp:image -->"#);
}

#[test]
fn test_attribute_values_are_escaped() {
    let markup = npf_to_blocks(
        r#"{"content":[{"type":"audio","url":"https://x.test/a.mp3?a=1&b=\"2\""}]}"#,
        &FormatTags::default(),
    )
    .unwrap();
    assert_eq!(
        markup,
        concat!(
            r#"<!-- wp:audio {"src":"https://x.test/a.mp3?a=1\u0026b=\u00222\u0022"} -->"#,
            r#"<figure class="wp-block-audio"><audio controls src="https://x.test/a.mp3?a=1&amp;b=&quot;2&quot;"></audio></figure>"#,
            r#"<!-- /wp:audio -->"#
        )
    );
}

#[test]
fn test_missing_media_surfaces_as_error() {
    let err = npf_to_blocks(
        r#"{"content":[{"type":"text","text":"a"},{"type":"audio"}]}"#,
        &FormatTags::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConvertError::MissingField {
            index: 1,
            block: "audio",
            field: "media.url"
        }
    );
    assert_eq!(err.to_string(), "block 1 (audio) is missing `media.url`");
}

#[test]
fn test_malformed_posts_never_emit() {
    for source in ["", "[]", r#"{"content":{}}"#, r#"{"content":[1]}"#] {
        assert!(
            matches!(
                npf_to_blocks(source, &FormatTags::default()),
                Err(ConvertError::Malformed { .. })
            ),
            "expected malformed error for {source:?}"
        );
    }
}
