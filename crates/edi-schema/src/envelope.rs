//! Fixed envelope layout shared by every supported transaction set

/// Interchange control header id
pub const INTERCHANGE_HEADER: &str = "ISA";
/// Transaction set header id
pub const TRANSACTION_SET_HEADER: &str = "ST";

/// Segment ids every document must open with, in order
pub const OPENING_SEQUENCE: [&str; 3] = ["ISA", "GS", "ST"];
/// Segment ids every document must close with, in order
pub const CLOSING_SEQUENCE: [&str; 3] = ["SE", "GE", "IEA"];

/// Minimum number of elements in the interchange header
pub const ISA_MIN_ELEMENTS: usize = 16;

/// Maximum length of each interchange header element, by position
pub const ISA_ELEMENT_MAX_LENGTHS: [usize; ISA_MIN_ELEMENTS] =
    [2, 10, 2, 10, 2, 15, 2, 15, 6, 4, 1, 5, 2, 1, 1, 1];

/// Minimum element counts for segments checked individually
pub const MIN_ELEMENT_COUNTS: [(&str, usize); 2] = [("ST", 2), ("BEG", 3)];

/// Interchange versions recognized in the header's trailing element
pub const KNOWN_VERSIONS: [&str; 2] = ["004010", "005010"];

/// Reported when no known version or type can be detected
pub const UNKNOWN: &str = "Unknown";
