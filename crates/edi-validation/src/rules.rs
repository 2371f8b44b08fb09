//! Business rules for extracted transaction sets
//!
//! Rules run against the typed record, never the raw segments, and only
//! produce Error-severity messages.

use edi_ir::{
    AdvanceShipNotice, FunctionalAcknowledgment, Invoice, LineItem, PurchaseOrder, TransactionSet,
};
use tracing::debug;

use crate::reporter::{ValidationMessage, ValidationOutcome};

/// Validate the business rules of an extracted record
#[must_use]
pub fn validate_business_rules(set: &TransactionSet) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::new();

    match set {
        TransactionSet::PurchaseOrder(po) => purchase_order_rules(po, &mut outcome),
        TransactionSet::Invoice(invoice) => invoice_rules(invoice, &mut outcome),
        TransactionSet::AdvanceShipNotice(asn) => ship_notice_rules(asn, &mut outcome),
        TransactionSet::FunctionalAcknowledgment(ack) => acknowledgment_rules(ack, &mut outcome),
    }

    debug!(
        code = set.code(),
        valid = outcome.is_valid(),
        "Business rule validation completed"
    );

    outcome
}

fn require(outcome: &mut ValidationOutcome, value: &str, code: &str, text: &str, field: &str) {
    if value.is_empty() {
        outcome.push(ValidationMessage::error(code, text).with_field(field));
    }
}

fn require_line_items(outcome: &mut ValidationOutcome, items: &[LineItem], document: &str) {
    if items.is_empty() {
        outcome.push(
            ValidationMessage::error(
                "NO_LINE_ITEMS",
                format!("{document} must have at least one line item"),
            )
            .with_field("line_items"),
        );
    }
}

#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn purchase_order_rules(po: &PurchaseOrder, outcome: &mut ValidationOutcome) {
    require(
        outcome,
        &po.po_number,
        "MISSING_PO_NUMBER",
        "Purchase Order number is required",
        "po_number",
    );
    require_line_items(outcome, &po.line_items, "Purchase Order");

    for (index, item) in po.line_items.iter().enumerate() {
        let ordinal = index + 1;

        if item.line_number.is_empty() {
            outcome.push(
                ValidationMessage::error(
                    "MISSING_LINE_NUMBER",
                    format!("Line item {ordinal} must have a line number"),
                )
                .with_field(format!("line_items[{index}].line_number")),
            );
        }

        // NaN fails this comparison too
        if !(item.quantity.value > 0.0) {
            outcome.push(
                ValidationMessage::error(
                    "INVALID_QUANTITY",
                    format!("Line item {ordinal} quantity must be greater than 0"),
                )
                .with_field(format!("line_items[{index}].quantity")),
            );
        }
    }
}

fn invoice_rules(invoice: &Invoice, outcome: &mut ValidationOutcome) {
    require(
        outcome,
        &invoice.invoice_number,
        "MISSING_INVOICE_NUMBER",
        "Invoice number is required",
        "invoice_number",
    );
    require_line_items(outcome, &invoice.line_items, "Invoice");
}

fn ship_notice_rules(asn: &AdvanceShipNotice, outcome: &mut ValidationOutcome) {
    require(
        outcome,
        &asn.shipment_id,
        "MISSING_SHIPMENT_ID",
        "Shipment ID is required",
        "shipment_id",
    );
}

fn acknowledgment_rules(ack: &FunctionalAcknowledgment, outcome: &mut ValidationOutcome) {
    require(
        outcome,
        &ack.original_transaction_set_id,
        "MISSING_ORIGINAL_TRANSACTION_SET_ID",
        "Original transaction set ID is required",
        "original_transaction_set_id",
    );
}
