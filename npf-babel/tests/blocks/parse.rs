//! Parsing block markup as an editor writes it (with newlines between blocks).

use insta::assert_snapshot;
use npf_babel::format::Format;
use npf_babel::formats::blocks::BlocksFormat;
use npf_babel::formats::treeviz::to_treeviz_str;
use npf_babel::registry::FormatRegistry;
use npf_babel::FormatError;

const EDITOR_OUTPUT: &str = r#"<!-- wp:heading {"level":1} -->
<h1 class="wp-block-heading">Notes</h1>
<!-- /wp:heading -->

<!-- wp:list -->
<ul class="wp-block-list"><!-- wp:list-item -->
<li>one</li>
<!-- /wp:list-item -->

<!-- wp:list-item -->
<li>two</li>
<!-- /wp:list-item --></ul>
<!-- /wp:list -->

<!-- wp:separator /-->
"#;

#[test]
fn test_editor_markup_tree() {
    let doc = BlocksFormat.parse(EDITOR_OUTPUT).unwrap();
    assert_snapshot!(to_treeviz_str(&doc), @r#"
    ⧉ Document (3 blocks)
    ├─ § heading {"level":1}: Notes
    ├─ ☰ list
    │ ├─ • list-item: one
    │ └─ • list-item: two
    └─ ⎯ separator
    "#);
}

#[test]
fn test_whitespace_inside_blocks_is_content() {
    let doc = BlocksFormat.parse(EDITOR_OUTPUT).unwrap();
    let list = &doc.blocks[1];
    assert_eq!(
        list.inner_content,
        vec![
            Some("\n<ul class=\"wp-block-list\">".to_string()),
            None,
            Some("\n\n".to_string()),
            None,
            Some("</ul>\n".to_string()),
        ]
    );
    assert_eq!(list.inner_html, "\n<ul class=\"wp-block-list\">\n\n</ul>\n");
    assert_eq!(list.inner_blocks[0].inner_html, "\n<li>one</li>\n");
}

#[test]
fn test_reserialization_drops_only_top_level_whitespace() {
    let registry = FormatRegistry::default();
    let doc = registry.parse(EDITOR_OUTPUT, "blocks").unwrap();
    let markup = registry.serialize(&doc, "blocks").unwrap();
    let expected = EDITOR_OUTPUT
        .replace("<!-- /wp:heading -->\n\n", "<!-- /wp:heading -->")
        .replace("<!-- /wp:list -->\n\n", "<!-- /wp:list -->");
    assert_eq!(markup, expected.trim_end());
}

#[test]
fn test_parse_errors_name_the_block() {
    let err = BlocksFormat
        .parse("<!-- wp:quote --><!-- wp:paragraph --><p>x</p><!-- /wp:quote -->")
        .unwrap_err();
    match err {
        FormatError::ParseError(message) => {
            assert!(message.contains("core/quote"), "{message}");
            assert!(message.contains("core/paragraph"), "{message}");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}
