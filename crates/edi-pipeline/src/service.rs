//! Request/response service layer
//!
//! Wraps the pipeline in the three operations exposed to callers: process a
//! document, validate a document, and list the supported transaction sets.
//! Panics escaping a core stage are caught here and reported as
//! `INTERNAL_ERROR` with a generic message.

use std::panic::{self, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use edi_adapter_x12::{detect_type, detect_version, tokenize};
use edi_ir::{Segment, TransactionSet};
use edi_schema::{DocumentTypeDescriptor, TypeRegistry};
use edi_validation::{StructuralValidator, ValidationMessage};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::options::ProcessingOptions;
use crate::pipeline::{Pipeline, ProcessingStatus, unsupported_message};

/// Text of the single message returned for a caught panic
pub const INTERNAL_ERROR_TEXT: &str = "Internal server error";

/// Request to process one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMessageRequest {
    /// Raw document text
    #[serde(alias = "edi_message")]
    pub message: String,
    /// Declared transaction set code
    pub message_type: String,
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub options: ProcessingOptions,
}

/// Response to a process request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessMessageResponse {
    pub status: ProcessingStatus,
    pub message_type: String,
    pub processed_at: DateTime<Utc>,
    /// Extracted record keyed by its kind, `null` unless processing succeeded
    pub record: Option<TransactionSet>,
    pub messages: Vec<ValidationMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_segments: Option<Vec<Segment>>,
}

/// Request to validate one document without extracting it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateMessageRequest {
    #[serde(alias = "edi_message")]
    pub message: String,
    pub message_type: String,
    #[serde(default)]
    pub customer_id: String,
}

/// Response to a validate request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateMessageResponse {
    pub status: ProcessingStatus,
    pub messages: Vec<ValidationMessage>,
    /// Interchange version read from the header, empty when not inspected
    pub edi_version: String,
    /// Transaction set code read from the first `ST`, empty when not inspected
    pub detected_message_type: String,
}

/// One entry of the supported-types listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageTypeInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub supported: bool,
    pub required_segments: &'static [&'static str],
    pub optional_segments: &'static [&'static str],
}

impl From<&DocumentTypeDescriptor> for MessageTypeInfo {
    fn from(descriptor: &DocumentTypeDescriptor) -> Self {
        Self {
            code: descriptor.code,
            name: descriptor.name,
            description: descriptor.description,
            supported: true,
            required_segments: descriptor.required_segment_ids,
            optional_segments: descriptor.optional_segment_ids,
        }
    }
}

/// Response listing the supported transaction sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportedTypesResponse {
    pub supported_types: Vec<MessageTypeInfo>,
}

/// Stateless document service
#[derive(Debug, Clone, Copy)]
pub struct EdiService {
    pipeline: Pipeline,
}

impl EdiService {
    /// Create a service over the given registry
    #[must_use]
    pub fn new(registry: &'static TypeRegistry) -> Self {
        Self {
            pipeline: Pipeline::new(registry),
        }
    }

    /// Process a document, stamping the response with the current time
    #[must_use]
    pub fn process_message(&self, request: &ProcessMessageRequest) -> ProcessMessageResponse {
        self.process_message_at(request, Utc::now())
    }

    /// Process a document, stamping the response with `processed_at`
    #[must_use]
    pub fn process_message_at(
        &self,
        request: &ProcessMessageRequest,
        processed_at: DateTime<Utc>,
    ) -> ProcessMessageResponse {
        info!(
            message_type = %request.message_type,
            customer_id = %request.customer_id,
            "Processing message"
        );

        let outcome = guarded("process", || {
            self.pipeline
                .process(&request.message, &request.message_type, &request.options)
        });

        let response = match outcome {
            Some(outcome) => ProcessMessageResponse {
                status: outcome.status,
                message_type: request.message_type.clone(),
                processed_at,
                record: outcome.record,
                messages: outcome.messages,
                parsed_segments: outcome.segments,
            },
            None => ProcessMessageResponse {
                status: ProcessingStatus::InternalError,
                message_type: request.message_type.clone(),
                processed_at,
                record: None,
                messages: vec![internal_error_message()],
                parsed_segments: None,
            },
        };

        log_status("process", &request.message_type, response.status);
        response
    }

    /// Validate a document's structure and inspect its envelope
    #[must_use]
    pub fn validate_message(&self, request: &ValidateMessageRequest) -> ValidateMessageResponse {
        info!(
            message_type = %request.message_type,
            customer_id = %request.customer_id,
            "Validating message"
        );

        let Some(descriptor) = self.pipeline.registry().describe(&request.message_type) else {
            log_status(
                "validate",
                &request.message_type,
                ProcessingStatus::UnsupportedMessageType,
            );
            return ValidateMessageResponse {
                status: ProcessingStatus::UnsupportedMessageType,
                messages: vec![unsupported_message(&request.message_type)],
                edi_version: String::new(),
                detected_message_type: String::new(),
            };
        };

        let inspected = guarded("validate", || {
            let outcome = StructuralValidator::new().validate(&tokenize(&request.message), descriptor);
            (
                outcome,
                detect_version(&request.message),
                detect_type(&request.message),
            )
        });

        let response = match inspected {
            Some((outcome, version, detected)) => ValidateMessageResponse {
                status: if outcome.is_valid() {
                    ProcessingStatus::Success
                } else {
                    ProcessingStatus::ValidationError
                },
                messages: outcome.into_messages(),
                edi_version: version.to_string(),
                detected_message_type: detected,
            },
            None => ValidateMessageResponse {
                status: ProcessingStatus::InternalError,
                messages: vec![internal_error_message()],
                edi_version: String::new(),
                detected_message_type: String::new(),
            },
        };

        log_status("validate", &request.message_type, response.status);
        response
    }

    /// List the supported transaction sets
    ///
    /// The listing is the same for every customer; the id is only logged.
    #[must_use]
    pub fn supported_types(&self, customer_id: Option<&str>) -> SupportedTypesResponse {
        info!(customer_id = customer_id.unwrap_or_default(), "Listing supported message types");

        SupportedTypesResponse {
            supported_types: self
                .pipeline
                .registry()
                .descriptors()
                .map(MessageTypeInfo::from)
                .collect(),
        }
    }
}

impl Default for EdiService {
    fn default() -> Self {
        Self::new(TypeRegistry::global())
    }
}

fn internal_error_message() -> ValidationMessage {
    ValidationMessage::error("INTERNAL_ERROR", INTERNAL_ERROR_TEXT)
}

fn log_status(operation: &str, message_type: &str, status: ProcessingStatus) {
    match status {
        ProcessingStatus::Success => debug!(operation, message_type, "Request succeeded"),
        ProcessingStatus::InternalError => {}
        _ => warn!(operation, message_type, status = %status, "Request rejected"),
    }
}

/// Run `f`, turning a panic into `None`
///
/// The panic payload is logged and never returned to the caller.
fn guarded<T>(operation: &str, f: impl FnOnce() -> T) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_default();
            error!(operation, panic = %detail, "Internal error while handling request");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PURCHASE_ORDER: &str = "\
ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *240115*1200*U*00501*000000001*0*P*>*005010~
GS*PO*SENDER*RECEIVER*20240115*1200*1*X*005010~
ST*850*0001~
BEG*00*PO123456*20240115~
PO1*1*10*EA*25.50*WIDGET*SKU123~
SE*4*0001~
GE*1*1~
IEA*1*000000001~";

    fn request(message: &str, message_type: &str) -> ProcessMessageRequest {
        ProcessMessageRequest {
            message: message.to_string(),
            message_type: message_type.to_string(),
            customer_id: "CUST1".to_string(),
            options: ProcessingOptions::validating(),
        }
    }

    #[test]
    fn test_guarded_catches_panics() {
        assert_eq!(guarded("test", || 7), Some(7));
        assert_eq!(guarded("test", || -> u8 { panic!("boom") }), None);
    }

    #[test]
    fn test_process_message_stamps_given_time() {
        let at = DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let response = EdiService::default().process_message_at(&request(PURCHASE_ORDER, "850"), at);

        assert_eq!(response.status, ProcessingStatus::Success);
        assert_eq!(response.processed_at, at);
        assert_eq!(response.message_type, "850");
        assert!(response.parsed_segments.is_none());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "SUCCESS");
        assert_eq!(json["processed_at"], "2024-01-15T12:00:00Z");
        assert_eq!(json["record"]["purchase_order"]["po_number"], "PO123456");
        assert!(json.get("parsed_segments").is_none());
    }

    #[test]
    fn test_timestamp_does_not_change_messages() {
        let service = EdiService::default();
        let req = request(PURCHASE_ORDER, "850");

        let first = service.process_message_at(&req, DateTime::<Utc>::MIN_UTC);
        let second = service.process_message(&req);

        assert_eq!(first.messages, second.messages);
        assert_eq!(first.record, second.record);
    }

    #[test]
    fn test_validate_message_reports_envelope() {
        let response = EdiService::default().validate_message(&ValidateMessageRequest {
            message: PURCHASE_ORDER.to_string(),
            message_type: "850".to_string(),
            customer_id: String::new(),
        });

        assert_eq!(response.status, ProcessingStatus::Success);
        assert_eq!(response.edi_version, "005010");
        assert_eq!(response.detected_message_type, "850");
    }

    #[test]
    fn test_validate_unsupported_type() {
        let response = EdiService::default().validate_message(&ValidateMessageRequest {
            message: PURCHASE_ORDER.to_string(),
            message_type: "204".to_string(),
            customer_id: String::new(),
        });

        assert_eq!(response.status, ProcessingStatus::UnsupportedMessageType);
        assert_eq!(response.messages.len(), 1);
        assert!(response.edi_version.is_empty());
    }

    #[test]
    fn test_supported_types_listing() {
        let response = EdiService::default().supported_types(Some("CUST1"));

        let codes: Vec<&str> = response.supported_types.iter().map(|t| t.code).collect();
        assert_eq!(codes, vec!["850", "810", "856", "997"]);
        assert!(response.supported_types.iter().all(|t| t.supported));
        assert_eq!(
            response.supported_types[3].optional_segments,
            &["AK2", "AK5", "AK9"]
        );
    }

    #[test]
    fn test_request_accepts_either_message_key() {
        let request: ProcessMessageRequest =
            serde_json::from_str(r#"{"edi_message": "ST*850", "message_type": "850"}"#).unwrap();

        assert_eq!(request.message, "ST*850");
        assert!(request.customer_id.is_empty());
        assert_eq!(request.options, ProcessingOptions::default());
    }
}
