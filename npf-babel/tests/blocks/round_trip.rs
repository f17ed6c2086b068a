//! Serialized trees parse back into the same tree.

use npf_babel::format::Format;
use npf_babel::formats::blocks::{parse_blocks, serialize_blocks, BlocksFormat};
use npf_babel::formats::npf::NpfFormat;
use npf_babel::ir::nodes::{Attrs, Block, BlockDocument};
use proptest::prelude::*;
use serde_json::Value;

const NAMES: [&str; 5] = [
    "core/paragraph",
    "core/list",
    "core/quote",
    "my-plugin/card",
    "core/x-1",
];

fn arb_attrs() -> impl Strategy<Value = Attrs> {
    let value = prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z<>&\"'/\\\\ -]{0,12}".prop_map(Value::from),
    ];
    prop::collection::vec(("[a-zA-Z]{1,8}", value), 0..4)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn arb_html() -> impl Strategy<Value = String> {
    "[a-z <>/&\"=-]{0,16}"
}

fn arb_block() -> impl Strategy<Value = Block> {
    let leaf = (0..NAMES.len(), arb_attrs(), arb_html())
        .prop_map(|(name, attrs, html)| Block::leaf(NAMES[name], attrs, html));
    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            0..NAMES.len(),
            arb_attrs(),
            "<[a-z]{1,6}>",
            prop::collection::vec(inner, 1..4),
            "</[a-z]{1,6}>",
        )
            .prop_map(|(name, attrs, open, children, close)| {
                Block::container(NAMES[name], attrs, &open, children, &close)
            })
    })
}

proptest! {
    #[test]
    fn prop_serialized_trees_parse_back(blocks in prop::collection::vec(arb_block(), 0..5)) {
        let markup = serialize_blocks(&blocks).unwrap();
        let parsed = parse_blocks(&markup).unwrap();
        prop_assert_eq!(&parsed, &blocks);
        prop_assert_eq!(serialize_blocks(&parsed).unwrap(), markup);
    }

    #[test]
    fn prop_placeholders_match_children(blocks in prop::collection::vec(arb_block(), 0..5)) {
        let markup = serialize_blocks(&blocks).unwrap();
        for block in parse_blocks(&markup).unwrap() {
            prop_assert!(block.is_balanced());
        }
    }

    #[test]
    fn prop_attrs_never_break_the_comment(attrs in arb_attrs()) {
        let block = Block::leaf("core/paragraph", attrs, "<p>x</p>");
        let markup = serialize_blocks(std::slice::from_ref(&block)).unwrap();
        let opener_end = markup.find("-->").unwrap();
        prop_assert!(!markup["<!--".len()..opener_end].contains("--"));
        prop_assert!(markup[..opener_end].ends_with(' '));
        prop_assert_eq!(parse_blocks(&markup).unwrap(), vec![block]);
    }
}

#[test]
fn test_converted_post_round_trips() {
    let source = std::fs::read_to_string("tests/fixtures/kitchensink.json").unwrap();
    let doc = NpfFormat::default().parse(&source).unwrap();
    let markup = BlocksFormat.serialize(&doc).unwrap();
    let reparsed: BlockDocument = BlocksFormat.parse(&markup).unwrap();
    assert_eq!(reparsed, doc);
}
