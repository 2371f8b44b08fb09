//! # edi-schema
//!
//! Transaction set model and the static type registry for X12.
//!
//! The registry is the single source of truth for which document kinds the
//! engine accepts and which segments each kind requires. It is built once per
//! process and only ever read afterwards.

pub mod envelope;
pub mod model;
pub mod registry;

pub use model::{DocumentKind, DocumentTypeDescriptor};
pub use registry::TypeRegistry;

use thiserror::Error;

/// Errors that can occur when working with schemas
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unsupported message type: {0}")]
    UnsupportedType(String),
}

pub type Result<T> = std::result::Result<T, Error>;
