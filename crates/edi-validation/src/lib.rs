#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-validation
//!
//! Structural and business-rule validation for X12 transaction sets.
//!
//! Validation never fails: every finding is a [`ValidationMessage`] in a
//! [`ValidationOutcome`], and the caller decides what an Error means.
//!
//! ## Example Usage
//!
//! ```rust
//! use edi_ir::Segment;
//! use edi_schema::{DocumentKind, TypeRegistry};
//! use edi_validation::validate_structure;
//!
//! let descriptor = TypeRegistry::global().descriptor(DocumentKind::PurchaseOrder);
//! let segments = vec![Segment::new("GS", vec!["PO".to_string()], 1, 1)];
//!
//! let outcome = validate_structure(&segments, descriptor);
//! assert!(outcome.has_errors());
//! ```

pub mod engine;
pub mod reporter;
pub mod rules;

pub use engine::{StructuralValidator, validate_structure};
pub use reporter::{Severity, ValidationMessage, ValidationOutcome};
pub use rules::validate_business_rules;
