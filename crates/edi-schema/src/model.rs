//! Schema model definitions

use std::fmt;
use std::str::FromStr;

use edi_ir::TransactionSet;
use serde::Serialize;

use crate::Error;

/// The supported transaction sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DocumentKind {
    /// 850 Purchase Order
    PurchaseOrder,
    /// 810 Invoice
    Invoice,
    /// 856 Advance Ship Notice
    AdvanceShipNotice,
    /// 997 Functional Acknowledgment
    FunctionalAcknowledgment,
}

impl DocumentKind {
    /// All supported kinds, in registry order
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::PurchaseOrder,
        DocumentKind::Invoice,
        DocumentKind::AdvanceShipNotice,
        DocumentKind::FunctionalAcknowledgment,
    ];

    /// Transaction set identifier code
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            DocumentKind::PurchaseOrder => "850",
            DocumentKind::Invoice => "810",
            DocumentKind::AdvanceShipNotice => "856",
            DocumentKind::FunctionalAcknowledgment => "997",
        }
    }

    /// Human-readable name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::PurchaseOrder => "Purchase Order",
            DocumentKind::Invoice => "Invoice",
            DocumentKind::AdvanceShipNotice => "Advance Ship Notice",
            DocumentKind::FunctionalAcknowledgment => "Functional Acknowledgment",
        }
    }

    /// Slot of this kind in [`DocumentKind::ALL`]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            DocumentKind::PurchaseOrder => 0,
            DocumentKind::Invoice => 1,
            DocumentKind::AdvanceShipNotice => 2,
            DocumentKind::FunctionalAcknowledgment => 3,
        }
    }

    /// Look up a kind by its transaction set code
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl FromStr for DocumentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| Error::UnsupportedType(s.to_string()))
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<&TransactionSet> for DocumentKind {
    fn from(set: &TransactionSet) -> Self {
        match set {
            TransactionSet::PurchaseOrder(_) => DocumentKind::PurchaseOrder,
            TransactionSet::Invoice(_) => DocumentKind::Invoice,
            TransactionSet::AdvanceShipNotice(_) => DocumentKind::AdvanceShipNotice,
            TransactionSet::FunctionalAcknowledgment(_) => DocumentKind::FunctionalAcknowledgment,
        }
    }
}

/// Declared shape of one transaction set
///
/// Segment id lists are duplicate-free and ordered as declared, so reports
/// built from them are stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentTypeDescriptor {
    pub kind: DocumentKind,
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub required_segment_ids: &'static [&'static str],
    pub optional_segment_ids: &'static [&'static str],
}
