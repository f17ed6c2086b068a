//! Property tests for range resolution, inline rendering and list grouping.

use npf_babel::common::inline::{render_inline, FormatTags};
use npf_babel::common::ranges::resolve_spans;
use npf_babel::formats::npf::{convert_blocks, SourceBlock, StyledText};
use npf_babel::ir::inline::{FormatRange, ResolvedSpan};
use npf_babel::ir::nodes::ListKind;
use proptest::prelude::*;

const KINDS: [&str; 4] = ["bold", "italic", "strikethrough", "link"];

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zé <&]{0,24}"
}

fn arb_ranges() -> impl Strategy<Value = Vec<FormatRange>> {
    prop::collection::vec(
        (0usize..30, 0usize..30, 0usize..KINDS.len())
            .prop_map(|(a, b, k)| FormatRange::new(a.min(b), a.max(b), KINDS[k])),
        0..8,
    )
}

/// Span positions with their format kinds sorted, for order-insensitive comparison.
fn shape(spans: &[ResolvedSpan<'_>]) -> Vec<(usize, usize, Vec<String>)> {
    spans
        .iter()
        .map(|span| {
            let mut kinds: Vec<String> = span.formats.iter().map(|f| f.kind.clone()).collect();
            kinds.sort();
            (span.start, span.end, kinds)
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_spans_partition_the_text(text in arb_text(), ranges in arb_ranges()) {
        let len = text.chars().count();
        let spans = resolve_spans(len, &ranges);

        if len == 0 {
            prop_assert!(spans.is_empty());
        } else {
            prop_assert_eq!(spans.first().map(|s| s.start), Some(0));
            prop_assert_eq!(spans.last().map(|s| s.end), Some(len));
            for pair in spans.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
            prop_assert!(spans.iter().all(|s| !s.is_empty()));
        }
    }

    #[test]
    fn prop_spans_carry_exactly_their_covering_ranges(text in arb_text(), ranges in arb_ranges()) {
        let len = text.chars().count();
        for span in resolve_spans(len, &ranges) {
            let mut expected: Vec<&FormatRange> = ranges
                .iter()
                .filter(|r| r.start < r.end.min(len))
                .filter(|r| r.start <= span.start && span.end <= r.end.min(len))
                .collect();
            let mut actual = span.formats.clone();
            expected.sort_by(|a, b| (a.start, a.end, &a.kind).cmp(&(b.start, b.end, &b.kind)));
            actual.sort_by(|a, b| (a.start, a.end, &a.kind).cmp(&(b.start, b.end, &b.kind)));
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn prop_resolution_ignores_input_order(text in arb_text(), ranges in arb_ranges()) {
        let len = text.chars().count();
        let mut reversed = ranges.clone();
        reversed.reverse();
        prop_assert_eq!(
            shape(&resolve_spans(len, &ranges)),
            shape(&resolve_spans(len, &reversed))
        );
    }

    #[test]
    fn prop_empty_formatting_is_one_plain_span(text in "[a-z]{1,24}") {
        let spans = resolve_spans(text.chars().count(), &[]);
        prop_assert_eq!(spans.len(), 1);
        prop_assert_eq!(spans[0].start, 0);
        prop_assert_eq!(spans[0].end, text.chars().count());
        prop_assert!(spans[0].formats.is_empty());
    }

    #[test]
    fn prop_rendering_ignores_input_order(text in arb_text(), ranges in arb_ranges()) {
        let tags = FormatTags::default();
        let mut reversed = ranges.clone();
        reversed.reverse();
        prop_assert_eq!(
            render_inline(&text, &ranges, &tags),
            render_inline(&text, &reversed, &tags)
        );
    }

    #[test]
    fn prop_list_runs_become_one_container(
        before in 0usize..3,
        run in 1usize..6,
        after in 0usize..3,
        ordered in any::<bool>(),
    ) {
        let kind = if ordered { ListKind::Ordered } else { ListKind::Unordered };
        let mut blocks = Vec::new();
        blocks.extend((0..before).map(|i| SourceBlock::Paragraph(StyledText::plain(format!("p{i}")))));
        blocks.extend((0..run).map(|i| SourceBlock::ListItem {
            kind,
            text: StyledText::plain(format!("item {i}")),
        }));
        blocks.extend((0..after).map(|i| SourceBlock::Heading2(StyledText::plain(format!("h{i}")))));

        let out = convert_blocks(&blocks, &FormatTags::default()).unwrap();
        prop_assert_eq!(out.len(), before + 1 + after);
        let list = &out[before];
        prop_assert_eq!(list.block_name.as_str(), "core/list");
        prop_assert_eq!(list.inner_blocks.len(), run);
        prop_assert_eq!(list.placeholder_count(), run);
        prop_assert_eq!(list.attrs.get("ordered").is_some(), ordered);
    }
}
