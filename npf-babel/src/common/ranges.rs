//! Resolves overlapping formatting ranges into flat, non-overlapping spans.
//!
//! # The High-Level Concept
//!
//! A post annotates its text with ranges such as `bold [0, 5)` and
//! `italic [3, 8)`. Ranges may overlap in any way and arrive in any order.
//! Markup, however, has to nest, so before rendering we cut the text into
//! spans where the set of active formats is constant:
//!
//! ```text
//! text:    H e l l o   w o
//! bold:    [-------)
//! italic:        [---------)
//! spans:   [----)[--)[-----)
//!          {b}   {b,i} {i}
//! ```
//!
//! # The Algorithm
//!
//! 1. Clamp every range to the text and drop the ones that end up empty.
//! 2. Sort ranges by `start` (stable, so ties keep input order).
//! 3. Start with a single fragment covering the whole text, with no formats.
//! 4. For each range, rebuild the fragment list:
//!    - fragments that do not overlap the range are kept as they are
//!    - a fragment the range fully covers gets the range appended
//!    - a fragment the range partially covers is split into the part before
//!      the range, the overlap, and the part after; only the overlap gets the
//!      range, the other parts keep the formats they already had
//! 5. Fragments that end at or before the current range's start can never be
//!    touched again (later ranges start no earlier), so each pass copies them
//!    through without inspection.
//!
//! The list is rebuilt rather than spliced in place, so indices never have to
//! be patched up after an insertion.

use crate::ir::inline::{FormatRange, ResolvedSpan};

/// Splits `[0, text_len)` into spans carrying the ranges that cover them.
///
/// `text_len` is measured in characters, like the range offsets.
///
/// # Example
///
/// ```ignore
/// let ranges = vec![FormatRange::new(0, 2, "bold"), FormatRange::new(1, 2, "italic")];
/// let spans = resolve_spans(2, &ranges);
/// assert_eq!(spans.len(), 2);
/// assert!(spans[1].has_format("bold") && spans[1].has_format("italic"));
/// ```
pub fn resolve_spans(text_len: usize, formatting: &[FormatRange]) -> Vec<ResolvedSpan<'_>> {
    if text_len == 0 {
        return Vec::new();
    }

    let mut ranges: Vec<(usize, usize, &FormatRange)> = formatting
        .iter()
        .filter_map(|format| {
            let end = format.end.min(text_len);
            (format.start < end).then_some((format.start, end, format))
        })
        .collect();
    ranges.sort_by_key(|&(start, _, _)| start);

    let mut fragments = vec![ResolvedSpan {
        start: 0,
        end: text_len,
        formats: Vec::new(),
    }];
    let mut settled = 0;

    for (start, end, format) in ranges {
        let mut next = Vec::with_capacity(fragments.len() + 2);
        let mut pending = fragments.into_iter();
        next.extend(pending.by_ref().take(settled));

        for fragment in pending {
            if end <= fragment.start || start >= fragment.end {
                next.push(fragment);
                continue;
            }

            if start > fragment.start {
                next.push(ResolvedSpan {
                    start: fragment.start,
                    end: start,
                    formats: fragment.formats.clone(),
                });
            }

            let after = (end < fragment.end).then(|| ResolvedSpan {
                start: end,
                end: fragment.end,
                formats: fragment.formats.clone(),
            });

            let mut overlap = ResolvedSpan {
                start: fragment.start.max(start),
                end: fragment.end.min(end),
                formats: fragment.formats,
            };
            overlap.formats.push(format);
            next.push(overlap);
            next.extend(after);
        }

        settled = next.iter().take_while(|f| f.end <= start).count();
        fragments = next;
    }

    fragments
}
