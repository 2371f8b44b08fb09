#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-ir
//!
//! Intermediate Representation for X12 documents.
//!
//! This crate holds the two shapes a document takes while it moves through the
//! engine: the flat, ordered [`Segment`] list produced by tokenization, and the
//! typed [`TransactionSet`] record produced by extraction. Both are plain data,
//! created per request and immutable once handed to the next stage.

/// Typed records extracted from the supported transaction sets.
pub mod records;
/// Tokenized segment representation.
pub mod segment;

/// Typed transaction-set records and their building blocks.
pub use records::{
    AdvanceShipNotice, FunctionalAcknowledgment, Invoice, LineItem, Party, Product,
    PurchaseOrder, Quantity, TransactionSet, TransactionSetAck, UnitPrice,
};
/// Tokenized segment with source line and sequence position.
pub use segment::Segment;
