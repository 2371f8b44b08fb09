//! X12 envelope inspection (ISA/ST)
//!
//! Cheap lookups that scan raw text line by line without building the full
//! segment list. They accept any input the tokenizer accepts; finding
//! nothing is a normal result reported as `"Unknown"`.

use edi_schema::envelope::{INTERCHANGE_HEADER, KNOWN_VERSIONS, TRANSACTION_SET_HEADER, UNKNOWN};

use crate::syntax::{clean_line, split_segment};

/// Find the elements of the first line carrying the given segment id
fn first_segment<'a>(raw: &'a str, id: &str) -> Option<Vec<&'a str>> {
    raw.lines()
        .filter_map(clean_line)
        .filter_map(split_segment)
        .find(|(segment_id, _)| *segment_id == id)
        .map(|(_, elements)| elements.collect())
}

/// Detect the interchange version from the header's trailing element.
///
/// Returns `"004010"` or `"005010"`, or `"Unknown"` when there is no header
/// line or its trailing element carries neither marker.
pub fn detect_version(raw: &str) -> &'static str {
    let Some(elements) = first_segment(raw, INTERCHANGE_HEADER) else {
        return UNKNOWN;
    };
    let trailing = elements.last().copied().unwrap_or_default();

    KNOWN_VERSIONS
        .into_iter()
        .find(|marker| trailing.contains(marker))
        .unwrap_or(UNKNOWN)
}

/// Detect the transaction set code from the first qualifying `ST` line.
///
/// A qualifying line has `ST` as its id and exactly three ASCII digits as its
/// first element; anything else yields `"Unknown"`.
pub fn detect_type(raw: &str) -> String {
    raw.lines()
        .filter_map(clean_line)
        .filter_map(split_segment)
        .filter(|(id, _)| *id == TRANSACTION_SET_HEADER)
        .find_map(|(_, mut elements)| elements.next().filter(|code| is_set_code(code)))
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn is_set_code(value: &str) -> bool {
    value.len() == 3 && value.bytes().all(|b| b.is_ascii_digit())
}
