//! Structural validation engine
//!
//! Checks a tokenized document against the envelope rules and the declared
//! shape of its transaction set. Every check appends to one outcome; only an
//! empty document ends the run early.

use edi_ir::Segment;
use edi_schema::DocumentTypeDescriptor;
use edi_schema::envelope::{
    CLOSING_SEQUENCE, INTERCHANGE_HEADER, ISA_ELEMENT_MAX_LENGTHS, ISA_MIN_ELEMENTS,
    MIN_ELEMENT_COUNTS, OPENING_SEQUENCE,
};
use tracing::debug;

use crate::reporter::{ValidationMessage, ValidationOutcome};

/// Field name used by closing-sequence messages
const CLOSING_FIELD: &str = "closing_segments";

/// Structural validator for tokenized X12 documents
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl StructuralValidator {
    /// Create a new structural validator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate a segment sequence against a transaction set descriptor
    #[must_use]
    pub fn validate(
        &self,
        segments: &[Segment],
        descriptor: &DocumentTypeDescriptor,
    ) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();

        let Some(header) = segments.first() else {
            outcome.push(ValidationMessage::error(
                "EMPTY_MESSAGE",
                "EDI message is empty or contains no valid segments",
            ));
            return outcome;
        };

        if header.is(INTERCHANGE_HEADER) {
            check_interchange_header(header, &mut outcome);
        } else {
            outcome.push(
                ValidationMessage::error("INVALID_ISA_SEGMENT", "First segment must be ISA")
                    .with_field(INTERCHANGE_HEADER)
                    .at_line(header.line_number),
            );
        }

        check_required_segments(segments, descriptor, &mut outcome);
        check_opening_sequence(segments, &mut outcome);
        check_closing_sequence(segments, &mut outcome);
        check_element_counts(segments, &mut outcome);

        debug!(
            code = descriptor.code,
            segments = segments.len(),
            messages = outcome.messages().len(),
            valid = outcome.is_valid(),
            "Structural validation completed"
        );

        outcome
    }
}

/// Validate a segment sequence with a default validator
#[must_use]
pub fn validate_structure(
    segments: &[Segment],
    descriptor: &DocumentTypeDescriptor,
) -> ValidationOutcome {
    StructuralValidator::new().validate(segments, descriptor)
}

fn check_interchange_header(header: &Segment, outcome: &mut ValidationOutcome) {
    if header.element_count() < ISA_MIN_ELEMENTS {
        outcome.push(
            ValidationMessage::error(
                "INSUFFICIENT_ISA_ELEMENTS",
                format!("ISA segment must have at least {ISA_MIN_ELEMENTS} elements"),
            )
            .with_field(INTERCHANGE_HEADER),
        );
    }

    for (index, (value, max_length)) in header
        .elements
        .iter()
        .zip(ISA_ELEMENT_MAX_LENGTHS)
        .enumerate()
    {
        if value.chars().count() > max_length {
            let position = index + 1;
            outcome.push(
                ValidationMessage::warning(
                    "ISA_ELEMENT_TOO_LONG",
                    format!("ISA element {position} exceeds maximum length of {max_length}"),
                )
                .with_field(format!("ISA.{position}")),
            );
        }
    }
}

fn check_required_segments(
    segments: &[Segment],
    descriptor: &DocumentTypeDescriptor,
    outcome: &mut ValidationOutcome,
) {
    for required in descriptor.required_segment_ids {
        if !segments.iter().any(|segment| segment.is(required)) {
            outcome.push(
                ValidationMessage::error(
                    "MISSING_REQUIRED_SEGMENT",
                    format!("Required segment {required} is missing"),
                )
                .with_field(*required),
            );
        }
    }
}

fn check_opening_sequence(segments: &[Segment], outcome: &mut ValidationOutcome) {
    for (index, (segment, expected)) in segments.iter().zip(OPENING_SEQUENCE).enumerate() {
        if !segment.is(expected) {
            outcome.push(
                ValidationMessage::error(
                    "INVALID_SEGMENT_ORDER",
                    format!(
                        "Expected {expected} at position {}, found {}",
                        index + 1,
                        segment.id
                    ),
                )
                .with_field(expected)
                .at_line(segment.line_number),
            );
        }
    }
}

fn check_closing_sequence(segments: &[Segment], outcome: &mut ValidationOutcome) {
    let Some(tail) = segments
        .len()
        .checked_sub(CLOSING_SEQUENCE.len())
        .map(|start| &segments[start..])
    else {
        outcome.push(
            ValidationMessage::error(
                "MESSAGE_TOO_SHORT",
                format!(
                    "Message has {} segments, too few to carry the closing sequence",
                    segments.len()
                ),
            )
            .with_field(CLOSING_FIELD),
        );
        return;
    };

    let closed = tail
        .iter()
        .zip(CLOSING_SEQUENCE)
        .all(|(segment, expected)| segment.is(expected));

    if !closed {
        outcome.push(
            ValidationMessage::error(
                "INVALID_CLOSING_SEGMENTS",
                format!("Message must end with {}", CLOSING_SEQUENCE.join(", ")),
            )
            .with_field(CLOSING_FIELD),
        );
    }
}

fn check_element_counts(segments: &[Segment], outcome: &mut ValidationOutcome) {
    for segment in segments {
        let Some((id, minimum)) = MIN_ELEMENT_COUNTS
            .iter()
            .find(|(id, _)| segment.is(id))
        else {
            continue;
        };

        if segment.element_count() < *minimum {
            outcome.push(
                ValidationMessage::error(
                    format!("INSUFFICIENT_{id}_ELEMENTS"),
                    format!("{id} segment must have at least {minimum} elements"),
                )
                .with_field(*id)
                .at_line(segment.line_number),
            );
        }
    }
}
