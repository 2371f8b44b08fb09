//! Segment representation for the Intermediate Representation
#![allow(clippy::must_use_candidate)] // Constructor/accessor API intentionally omits pervasive #[must_use].

use serde::{Deserialize, Serialize};

/// One structural record of a document: an identifier plus its ordered elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment identifier (e.g., `ISA`, `BEG`, `PO1`)
    pub id: String,

    /// Data elements, excluding the identifier; `elements[0]` is element 1
    pub elements: Vec<String>,

    /// 1-based index of the source line, counting skipped lines
    pub line_number: usize,

    /// 1-based rank among produced segments, contiguous
    pub position: usize,
}

impl Segment {
    /// Create a new segment
    pub fn new(
        id: impl Into<String>,
        elements: Vec<String>,
        line_number: usize,
        position: usize,
    ) -> Self {
        Self {
            id: id.into(),
            elements,
            line_number,
            position,
        }
    }

    /// Element at a 0-based index, if present
    pub fn element(&self, index: usize) -> Option<&str> {
        self.elements.get(index).map(String::as_str)
    }

    /// Element at a 0-based index, or the empty string when absent
    pub fn element_or_empty(&self, index: usize) -> &str {
        self.element(index).unwrap_or_default()
    }

    /// Number of data elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Check the segment identifier
    pub fn is(&self, id: &str) -> bool {
        self.id == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beg() -> Segment {
        Segment::new(
            "BEG",
            vec!["00".to_string(), "PO123".to_string(), "20240115".to_string()],
            4,
            4,
        )
    }

    #[test]
    fn test_segment_creation() {
        let segment = beg();

        assert_eq!(segment.id, "BEG");
        assert_eq!(segment.element_count(), 3);
        assert_eq!(segment.line_number, 4);
        assert_eq!(segment.position, 4);
        assert!(segment.is("BEG"));
        assert!(!segment.is("BIG"));
    }

    #[test]
    fn test_element_access() {
        let segment = beg();

        assert_eq!(segment.element(1), Some("PO123"));
        assert_eq!(segment.element(3), None);
        assert_eq!(segment.element_or_empty(3), "");
    }

    #[test]
    fn test_segment_serializes_with_snake_case_fields() {
        let json = serde_json::to_value(beg()).unwrap();

        assert_eq!(json["id"], "BEG");
        assert_eq!(json["line_number"], 4);
        assert_eq!(json["position"], 4);
        assert_eq!(json["elements"][2], "20240115");
    }
}
