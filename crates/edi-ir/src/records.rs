//! Typed records for the supported transaction sets
//!
//! Each record is an aggregate of scalar fields plus zero or more repeatable
//! groups. String fields default to empty, party slots to `None`, numeric
//! values to `0.0`; a record built from an incomplete document is still a
//! well-formed value and it is up to business-rule validation to judge it.
#![allow(clippy::must_use_candidate)]

use serde::{Deserialize, Serialize};

/// A party named in an `N1` segment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Entity identifier code (e.g., `BY`, `ST`, `BT`)
    pub entity_role_code: String,
    /// Party name
    pub name: String,
}

impl Party {
    /// Create a new party
    pub fn new(entity_role_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            entity_role_code: entity_role_code.into(),
            name: name.into(),
        }
    }
}

/// Quantity with unit of measure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit_of_measure: String,
}

/// Unit price
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitPrice {
    pub value: f64,
}

/// Product reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub description: String,
}

/// A purchase-order or invoice line item (`PO1` / `IT1`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub line_number: String,
    pub quantity: Quantity,
    pub unit_price: UnitPrice,
    pub product: Product,
}

/// Transaction set 850
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub po_number: String,
    pub po_date: String,
    pub buyer: Option<Party>,
    pub seller: Option<Party>,
    pub ship_to: Option<Party>,
    pub bill_to: Option<Party>,
    /// Line items in encounter order
    pub line_items: Vec<LineItem>,
}

/// Transaction set 810
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_number: String,
    pub invoice_date: String,
    pub due_date: String,
    pub bill_to: Option<Party>,
    pub remit_to: Option<Party>,
    pub ship_from: Option<Party>,
    pub ship_to: Option<Party>,
    /// Line items in encounter order
    pub line_items: Vec<LineItem>,
}

/// Transaction set 856
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceShipNotice {
    pub shipment_id: String,
    pub shipment_date: String,
    pub expected_delivery_date: String,
    pub ship_from: Option<Party>,
    pub ship_to: Option<Party>,
    pub bill_to: Option<Party>,
    pub carrier: Option<Party>,
}

/// Acknowledgment of one transaction set (`AK2`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSetAck {
    pub transaction_set_id: String,
    pub control_number: String,
    pub acknowledgment_code: String,
}

/// Transaction set 997
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionalAcknowledgment {
    pub original_transaction_set_id: String,
    pub original_control_number: String,
    pub acknowledgment_code: String,
    /// Per-transaction-set acknowledgments in encounter order
    pub transaction_set_acks: Vec<TransactionSetAck>,
}

/// A typed record, one variant per supported transaction set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionSet {
    PurchaseOrder(PurchaseOrder),
    Invoice(Invoice),
    AdvanceShipNotice(AdvanceShipNotice),
    FunctionalAcknowledgment(FunctionalAcknowledgment),
}

impl TransactionSet {
    /// X12 transaction set identifier of this record
    pub fn code(&self) -> &'static str {
        match self {
            TransactionSet::PurchaseOrder(_) => "850",
            TransactionSet::Invoice(_) => "810",
            TransactionSet::AdvanceShipNotice(_) => "856",
            TransactionSet::FunctionalAcknowledgment(_) => "997",
        }
    }

    pub fn as_purchase_order(&self) -> Option<&PurchaseOrder> {
        match self {
            TransactionSet::PurchaseOrder(po) => Some(po),
            _ => None,
        }
    }

    pub fn as_invoice(&self) -> Option<&Invoice> {
        match self {
            TransactionSet::Invoice(invoice) => Some(invoice),
            _ => None,
        }
    }

    pub fn as_ship_notice(&self) -> Option<&AdvanceShipNotice> {
        match self {
            TransactionSet::AdvanceShipNotice(asn) => Some(asn),
            _ => None,
        }
    }

    pub fn as_acknowledgment(&self) -> Option<&FunctionalAcknowledgment> {
        match self {
            TransactionSet::FunctionalAcknowledgment(ack) => Some(ack),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_records_are_empty() {
        let po = PurchaseOrder::default();

        assert!(po.po_number.is_empty());
        assert!(po.buyer.is_none());
        assert!(po.line_items.is_empty());

        let ack = FunctionalAcknowledgment::default();
        assert!(ack.transaction_set_acks.is_empty());
    }

    #[test]
    fn test_transaction_set_codes() {
        assert_eq!(
            TransactionSet::PurchaseOrder(PurchaseOrder::default()).code(),
            "850"
        );
        assert_eq!(TransactionSet::Invoice(Invoice::default()).code(), "810");
        assert_eq!(
            TransactionSet::AdvanceShipNotice(AdvanceShipNotice::default()).code(),
            "856"
        );
        assert_eq!(
            TransactionSet::FunctionalAcknowledgment(FunctionalAcknowledgment::default()).code(),
            "997"
        );
    }

    #[test]
    fn test_variant_accessors() {
        let set = TransactionSet::Invoice(Invoice {
            invoice_number: "INV-1".to_string(),
            ..Default::default()
        });

        assert_eq!(set.as_invoice().unwrap().invoice_number, "INV-1");
        assert!(set.as_purchase_order().is_none());
        assert!(set.as_ship_notice().is_none());
        assert!(set.as_acknowledgment().is_none());
    }

    #[test]
    fn test_transaction_set_serializes_with_variant_key() {
        let set = TransactionSet::PurchaseOrder(PurchaseOrder {
            po_number: "PO-9".to_string(),
            buyer: Some(Party::new("BY", "ACME CORP")),
            ..Default::default()
        });

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["purchase_order"]["po_number"], "PO-9");
        assert_eq!(json["purchase_order"]["buyer"]["entity_role_code"], "BY");
        assert!(json["purchase_order"]["seller"].is_null());
    }
}
