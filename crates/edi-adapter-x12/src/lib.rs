//! # edi-adapter-x12
//!
//! X12 tokenizer, envelope detection, and transaction set extraction.
//!
//! Documents are line oriented: one segment per line, elements separated by
//! `*`, an optional trailing `~` segment terminator. Separators are fixed;
//! they are never negotiated from the interchange header.

pub mod envelopes;
pub mod extract;
pub mod parser;
pub mod syntax;

pub use envelopes::{detect_type, detect_version};
pub use extract::extract;
pub use parser::{SegmentReader, tokenize};

use thiserror::Error;

/// Errors that can occur when extracting X12 transaction sets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid numeric value '{value}' in {segment} element {element} at line {line}")]
    InvalidNumber {
        segment: String,
        element: usize,
        line: usize,
        value: String,
    },
}

impl Error {
    /// Build an invalid-number error; `element` is the 1-based element position
    pub fn invalid_number(
        segment: impl Into<String>,
        element: usize,
        line: usize,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidNumber {
            segment: segment.into(),
            element,
            line,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
