//! Pipeline orchestration
//!
//! Runs one raw document through the processing stages in a fixed order:
//! type gate, tokenization, structural validation, extraction, business
//! rules. The first failing stage decides the status and nothing after it
//! runs. The pipeline holds no mutable state, so the same input always
//! yields the same outcome.

use std::fmt;

use edi_adapter_x12::{detect_version, extract, tokenize};
use edi_ir::{Segment, TransactionSet};
use edi_schema::TypeRegistry;
use edi_validation::{
    StructuralValidator, ValidationMessage, ValidationOutcome, validate_business_rules,
};
use serde::Serialize;
use tracing::debug;

use crate::options::ProcessingOptions;

/// Final status of a processed document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    Success,
    ValidationError,
    ParsingError,
    BusinessRuleError,
    UnsupportedMessageType,
    /// Set only at the service boundary, never by the pipeline itself
    InternalError,
}

impl ProcessingStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingStatus::Success => "SUCCESS",
            ProcessingStatus::ValidationError => "VALIDATION_ERROR",
            ProcessingStatus::ParsingError => "PARSING_ERROR",
            ProcessingStatus::BusinessRuleError => "BUSINESS_RULE_ERROR",
            ProcessingStatus::UnsupportedMessageType => "UNSUPPORTED_MESSAGE_TYPE",
            ProcessingStatus::InternalError => "INTERNAL_ERROR",
        }
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        self == ProcessingStatus::Success
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of processing one document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessOutcome {
    pub status: ProcessingStatus,
    /// Transaction set code the caller asked for
    pub document_code: String,
    /// Extracted record, present only on success
    pub record: Option<TransactionSet>,
    /// Messages accumulated by the stages that ran
    pub messages: Vec<ValidationMessage>,
    /// Tokenized segments, present only on success and when requested
    pub segments: Option<Vec<Segment>>,
}

impl ProcessOutcome {
    fn failed(
        status: ProcessingStatus,
        document_code: &str,
        messages: Vec<ValidationMessage>,
    ) -> Self {
        Self {
            status,
            document_code: document_code.to_string(),
            record: None,
            messages,
            segments: None,
        }
    }

    /// Outcome for a document code the registry does not know
    #[must_use]
    pub fn unsupported(document_code: &str) -> Self {
        Self::failed(
            ProcessingStatus::UnsupportedMessageType,
            document_code,
            vec![unsupported_message(document_code)],
        )
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// The single Error message reported for an unsupported document code
#[must_use]
pub fn unsupported_message(document_code: &str) -> ValidationMessage {
    ValidationMessage::error(
        "UNSUPPORTED_MESSAGE_TYPE",
        format!("Message type {document_code} is not supported"),
    )
    .with_field("message_type")
}

/// Document processing pipeline
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    registry: &'static TypeRegistry,
    validator: StructuralValidator,
}

impl Pipeline {
    /// Create a pipeline over the given registry
    #[must_use]
    pub fn new(registry: &'static TypeRegistry) -> Self {
        Self {
            registry,
            validator: StructuralValidator::new(),
        }
    }

    /// The registry this pipeline checks document codes against
    #[must_use]
    pub fn registry(&self) -> &'static TypeRegistry {
        self.registry
    }

    /// Process one raw document declared as `document_code`
    #[must_use]
    pub fn process(
        &self,
        raw: &str,
        document_code: &str,
        options: &ProcessingOptions,
    ) -> ProcessOutcome {
        let Some(descriptor) = self.registry.describe(document_code) else {
            debug!(code = document_code, "Rejecting unsupported document code");
            return ProcessOutcome::unsupported(document_code);
        };

        let segments = tokenize(raw);
        debug!(code = document_code, segments = segments.len(), "Tokenized document");

        let mut carried = ValidationOutcome::new();
        if options.validate_format {
            let structural = self.validator.validate(&segments, descriptor);
            if structural.has_errors() {
                return ProcessOutcome::failed(
                    ProcessingStatus::ValidationError,
                    document_code,
                    structural.into_messages(),
                );
            }
            carried.extend(structural);
        }

        let record = match extract(descriptor.kind, &segments) {
            Ok(record) => record,
            Err(err) => {
                debug!(code = document_code, error = %err, "Extraction failed");
                carried.push(ValidationMessage::error("PARSING_ERROR", err.to_string()));
                return ProcessOutcome::failed(
                    ProcessingStatus::ParsingError,
                    document_code,
                    carried.into_messages(),
                );
            }
        };

        if options.validate_business_rules {
            carried.extend(validate_business_rules(&record));
            if carried.has_errors() {
                return ProcessOutcome::failed(
                    ProcessingStatus::BusinessRuleError,
                    document_code,
                    carried.into_messages(),
                );
            }
        }

        if options.include_parsing_details {
            carried.push(ValidationMessage::info(
                "PARSING_DETAILS",
                format!(
                    "Parsed {} segments; detected version {}",
                    segments.len(),
                    detect_version(raw)
                ),
            ));
        }

        debug!(code = document_code, "Document processed");

        ProcessOutcome {
            status: ProcessingStatus::Success,
            document_code: document_code.to_string(),
            record: Some(record),
            messages: carried.into_messages(),
            segments: options.include_raw_segments.then_some(segments),
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(TypeRegistry::global())
    }
}

/// Process one raw document against the global registry
#[must_use]
pub fn process(raw: &str, document_code: &str, options: &ProcessingOptions) -> ProcessOutcome {
    Pipeline::default().process(raw, document_code, options)
}
