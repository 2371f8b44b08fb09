//! Static registry of supported transaction sets

use std::sync::OnceLock;

use tracing::debug;

use crate::model::{DocumentKind, DocumentTypeDescriptor};

static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();

/// Read-only table of the supported transaction sets
#[derive(Debug)]
pub struct TypeRegistry {
    descriptors: [DocumentTypeDescriptor; 4],
}

impl TypeRegistry {
    /// Build a registry holding the four supported transaction sets
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptors: DocumentKind::ALL.map(describe_kind),
        }
    }

    /// The process-wide registry, built on first use
    pub fn global() -> &'static TypeRegistry {
        REGISTRY.get_or_init(|| {
            debug!("Initializing transaction set registry");
            TypeRegistry::new()
        })
    }

    /// Check if a transaction set code is supported
    #[must_use]
    pub fn is_supported(&self, code: &str) -> bool {
        self.describe(code).is_some()
    }

    /// Get the descriptor for a transaction set code
    #[must_use]
    pub fn describe(&self, code: &str) -> Option<&DocumentTypeDescriptor> {
        self.descriptors.iter().find(|d| d.code == code)
    }

    /// Get the descriptor for a kind
    #[must_use]
    pub fn descriptor(&self, kind: DocumentKind) -> &DocumentTypeDescriptor {
        &self.descriptors[kind.index()]
    }

    /// All descriptors, in registry order
    pub fn descriptors(&self) -> impl Iterator<Item = &DocumentTypeDescriptor> {
        self.descriptors.iter()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_kind(kind: DocumentKind) -> DocumentTypeDescriptor {
    DocumentTypeDescriptor {
        kind,
        code: kind.code(),
        name: kind.name(),
        description: description(kind),
        required_segment_ids: required_segments(kind),
        optional_segment_ids: optional_segments(kind),
    }
}

fn description(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::PurchaseOrder => "EDI 850 Purchase Order transaction set",
        DocumentKind::Invoice => "EDI 810 Invoice transaction set",
        DocumentKind::AdvanceShipNotice => "EDI 856 Advance Ship Notice transaction set",
        DocumentKind::FunctionalAcknowledgment => {
            "EDI 997 Functional Acknowledgment transaction set"
        }
    }
}

fn required_segments(kind: DocumentKind) -> &'static [&'static str] {
    match kind {
        DocumentKind::PurchaseOrder => &["ISA", "GS", "ST", "BEG", "SE", "GE", "IEA"],
        DocumentKind::Invoice => &["ISA", "GS", "ST", "BIG", "SE", "GE", "IEA"],
        DocumentKind::AdvanceShipNotice => &["ISA", "GS", "ST", "BSN", "SE", "GE", "IEA"],
        DocumentKind::FunctionalAcknowledgment => &["ISA", "GS", "ST", "AK1", "SE", "GE", "IEA"],
    }
}

fn optional_segments(kind: DocumentKind) -> &'static [&'static str] {
    match kind {
        DocumentKind::PurchaseOrder => &["REF", "N1", "N3", "N4", "PO1", "CTT"],
        DocumentKind::Invoice => &["REF", "N1", "N3", "N4", "IT1", "TDS", "CTT"],
        DocumentKind::AdvanceShipNotice => &["REF", "N1", "N3", "N4", "HL", "PRF", "TD1", "TD5"],
        DocumentKind::FunctionalAcknowledgment => &["AK2", "AK5", "AK9"],
    }
}
