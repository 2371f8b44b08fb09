//! Validation messages and outcomes

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Severity of a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Blocks the document
    Error,
    /// Reported but not blocking
    Warning,
    /// Informational only
    Info,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding from one of the validation stages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
    pub severity: Severity,
    /// Stable machine-readable code (e.g., `MISSING_REQUIRED_SEGMENT`)
    pub code: String,
    /// Human-readable description
    pub text: String,
    /// Field or segment the message refers to
    pub field: Option<String>,
    /// Source line, when the message points at one segment
    pub line_number: Option<usize>,
}

impl ValidationMessage {
    /// Create a message without field or line
    pub fn new(severity: Severity, code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            text: text.into(),
            field: None,
            line_number: None,
        }
    }

    pub fn error(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, text)
    }

    pub fn warning(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, text)
    }

    pub fn info(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Severity::Info, code, text)
    }

    /// Attach the field the message refers to
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Attach a source line number
    #[must_use]
    pub fn at_line(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] [{}] {}", self.severity, self.code, self.text)?;

        match (&self.field, self.line_number) {
            (Some(field), Some(line)) => write!(f, " (field={field}, line={line})"),
            (Some(field), None) => write!(f, " (field={field})"),
            (None, Some(line)) => write!(f, " (line={line})"),
            (None, None) => Ok(()),
        }
    }
}

/// Ordered messages from one or more validation stages
///
/// Validity is derived from the messages on every call: an outcome is valid
/// exactly when it holds no Error-severity message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    messages: Vec<ValidationMessage>,
}

impl ValidationOutcome {
    /// Create an empty (valid) outcome
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ValidationMessage) {
        self.messages.push(message);
    }

    /// Append all messages of another outcome, keeping their order
    pub fn extend(&mut self, other: ValidationOutcome) {
        self.messages.extend(other.messages);
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(ValidationMessage::is_error)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Number of messages with the given severity
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == severity)
            .count()
    }

    #[must_use]
    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    #[must_use]
    pub fn into_messages(self) -> Vec<ValidationMessage> {
        self.messages
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<Vec<ValidationMessage>> for ValidationOutcome {
    fn from(messages: Vec<ValidationMessage>) -> Self {
        Self { messages }
    }
}

impl Serialize for ValidationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationOutcome", 3)?;
        state.serialize_field("is_valid", &self.is_valid())?;
        state.serialize_field("has_errors", &self.has_errors())?;
        state.serialize_field("messages", &self.messages)?;
        state.end()
    }
}
