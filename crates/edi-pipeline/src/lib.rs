#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-pipeline
//!
//! Document processing pipeline and the service operations built on it.
//!
//! The pipeline is a linear sequence of stages (type gate, tokenization,
//! structural validation, extraction, business rules) whose first failure
//! decides the outcome. [`EdiService`] wraps it in request/response types,
//! stamps responses with a timestamp, and turns panics into
//! `INTERNAL_ERROR` responses.
//!
//! ## Example Usage
//!
//! ```rust
//! use edi_pipeline::{ProcessingOptions, ProcessingStatus, process};
//!
//! let outcome = process("AK1*850*0001*A", "997", &ProcessingOptions::default());
//! assert_eq!(outcome.status, ProcessingStatus::Success);
//! ```

pub mod options;
pub mod pipeline;
pub mod service;

pub use options::ProcessingOptions;
pub use pipeline::{Pipeline, ProcessOutcome, ProcessingStatus, process};
pub use service::{
    EdiService, MessageTypeInfo, ProcessMessageRequest, ProcessMessageResponse,
    SupportedTypesResponse, ValidateMessageRequest, ValidateMessageResponse,
};
