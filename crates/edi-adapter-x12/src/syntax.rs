//! X12 syntax definitions and delimiter handling
//!
//! Separators are fixed constants. Sub-element and repetition separators are
//! not interpreted: they stay part of the element text.

/// Element separator
pub const ELEMENT_SEPARATOR: char = '*';
/// Segment terminator, optional at the end of each line
pub const SEGMENT_TERMINATOR: char = '~';

/// Clean one raw line: trim whitespace and drop a trailing segment terminator.
///
/// Returns `None` for lines that are empty after cleaning.
pub fn clean_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let trimmed = trimmed
        .strip_suffix(SEGMENT_TERMINATOR)
        .map_or(trimmed, str::trim_end);
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Split a cleaned line into its segment id and element values.
///
/// Returns `None` when the line carries no element separator, i.e. when it
/// cannot be a segment.
pub fn split_segment(line: &str) -> Option<(&str, impl Iterator<Item = &str>)> {
    let (id, rest) = line.split_once(ELEMENT_SEPARATOR)?;
    Some((id, rest.split(ELEMENT_SEPARATOR)))
}
