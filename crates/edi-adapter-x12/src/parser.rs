//! X12 segment tokenizer
//!
//! This module provides a streaming reader that yields segments one at a
//! time from raw document text. Tokenization never fails: lines that cannot
//! be segments are skipped, and skipping them leaves no gap in the
//! `position` sequence while `line_number` still points at the source line.

use std::iter::Enumerate;
use std::str::Lines;

use edi_ir::Segment;
use tracing::trace;

use crate::syntax::{clean_line, split_segment};

/// Streaming tokenizer over raw document text
pub struct SegmentReader<'a> {
    lines: Enumerate<Lines<'a>>,
    produced: usize,
}

impl<'a> SegmentReader<'a> {
    /// Create a new reader over raw document text
    pub fn new(raw: &'a str) -> Self {
        Self {
            lines: raw.lines().enumerate(),
            produced: 0,
        }
    }
}

impl Iterator for SegmentReader<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        for (index, line) in self.lines.by_ref() {
            let line_number = index + 1;

            let Some(cleaned) = clean_line(line) else {
                continue;
            };
            let Some((id, elements)) = split_segment(cleaned) else {
                trace!(line = line_number, "Skipping line without element separator");
                continue;
            };

            self.produced += 1;
            return Some(Segment::new(
                id,
                elements.map(str::to_string).collect(),
                line_number,
                self.produced,
            ));
        }

        None
    }
}

/// Tokenize raw document text into its ordered segments
pub fn tokenize(raw: &str) -> Vec<Segment> {
    SegmentReader::new(raw).collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_document() -> impl Strategy<Value = String> {
        let line = prop_oneof![
            "[A-Z0-9]{1,3}(\\*[A-Za-z0-9 >~]{0,6}){0,6}~?",
            "[ \t]*",
            "\\PC{0,20}",
        ];
        (prop::collection::vec(line, 0..24), prop::bool::ANY).prop_map(|(lines, crlf)| {
            lines.join(if crlf { "\r\n" } else { "\n" })
        })
    }

    fn assert_well_formed(raw: &str) -> Result<(), TestCaseError> {
        let segments = tokenize(raw);
        let line_count = raw.lines().count();

        for (index, segment) in segments.iter().enumerate() {
            prop_assert_eq!(segment.position, index + 1);
            prop_assert!(segment.line_number >= 1 && segment.line_number <= line_count);
            prop_assert!(!segment.id.contains(crate::syntax::ELEMENT_SEPARATOR));
            prop_assert!(
                segment
                    .elements
                    .iter()
                    .all(|e| !e.contains(crate::syntax::ELEMENT_SEPARATOR))
            );
        }
        for pair in segments.windows(2) {
            prop_assert!(pair[0].line_number < pair[1].line_number);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn tokenize_arbitrary_text(raw in "\\PC*") {
            assert_well_formed(&raw)?;
        }

        #[test]
        fn tokenize_segment_like_text(raw in arb_document()) {
            assert_well_formed(&raw)?;
        }

        #[test]
        fn tokenize_is_repeatable(raw in arb_document()) {
            prop_assert_eq!(tokenize(&raw), tokenize(&raw));
        }
    }
}
