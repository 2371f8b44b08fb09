//! Transaction set extraction
//!
//! Walks the tokenized segments of one document and fills the typed record
//! for its kind. Unrecognized segments are ignored and missing elements leave
//! their field at its default. The only failure is a numeric element that
//! does not parse.

use edi_ir::{
    AdvanceShipNotice, FunctionalAcknowledgment, Invoice, LineItem, Party, Product,
    PurchaseOrder, Quantity, Segment, TransactionSet, TransactionSetAck, UnitPrice,
};
use edi_schema::DocumentKind;
use tracing::debug;

use crate::{Error, Result};

/// Extract the typed record of `kind` from a segment sequence
pub fn extract(kind: DocumentKind, segments: &[Segment]) -> Result<TransactionSet> {
    debug!(kind = %kind, segments = segments.len(), "Extracting transaction set");

    let record = match kind {
        DocumentKind::PurchaseOrder => TransactionSet::PurchaseOrder(extract_purchase_order(segments)?),
        DocumentKind::Invoice => TransactionSet::Invoice(extract_invoice(segments)?),
        DocumentKind::AdvanceShipNotice => {
            TransactionSet::AdvanceShipNotice(extract_ship_notice(segments))
        }
        DocumentKind::FunctionalAcknowledgment => {
            TransactionSet::FunctionalAcknowledgment(extract_acknowledgment(segments))
        }
    };

    Ok(record)
}

/// Extract an 850 purchase order
pub fn extract_purchase_order(segments: &[Segment]) -> Result<PurchaseOrder> {
    let mut po = PurchaseOrder::default();
    let mut line_items = Vec::new();

    for segment in segments {
        match segment.id.as_str() {
            "BEG" => {
                po.po_number = element(segment, 1);
                po.po_date = element(segment, 2);
            }
            "PO1" => line_items.push(line_item(segment)?),
            "N1" => {
                if let Some(party) = party(segment) {
                    match party.entity_role_code.as_str() {
                        "BY" => po.buyer = Some(party),
                        "SE" => po.seller = Some(party),
                        "ST" => po.ship_to = Some(party),
                        "BT" => po.bill_to = Some(party),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    po.line_items = line_items;
    Ok(po)
}

/// Extract an 810 invoice
pub fn extract_invoice(segments: &[Segment]) -> Result<Invoice> {
    let mut invoice = Invoice::default();
    let mut line_items = Vec::new();

    for segment in segments {
        match segment.id.as_str() {
            "BIG" => {
                invoice.invoice_date = element(segment, 0);
                invoice.invoice_number = element(segment, 1);
                invoice.due_date = element(segment, 2);
            }
            "IT1" => line_items.push(line_item(segment)?),
            "N1" => {
                if let Some(party) = party(segment) {
                    match party.entity_role_code.as_str() {
                        "BT" => invoice.bill_to = Some(party),
                        "RE" => invoice.remit_to = Some(party),
                        "SF" => invoice.ship_from = Some(party),
                        "ST" => invoice.ship_to = Some(party),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    invoice.line_items = line_items;
    Ok(invoice)
}

/// Extract an 856 advance ship notice
pub fn extract_ship_notice(segments: &[Segment]) -> AdvanceShipNotice {
    let mut asn = AdvanceShipNotice::default();

    for segment in segments {
        match segment.id.as_str() {
            "BSN" => {
                asn.shipment_id = element(segment, 0);
                asn.shipment_date = element(segment, 1);
                asn.expected_delivery_date = element(segment, 2);
            }
            "N1" => {
                if let Some(party) = party(segment) {
                    match party.entity_role_code.as_str() {
                        "SF" => asn.ship_from = Some(party),
                        "ST" => asn.ship_to = Some(party),
                        "BT" => asn.bill_to = Some(party),
                        "CA" => asn.carrier = Some(party),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    asn
}

/// Extract a 997 functional acknowledgment
///
/// `AK5` overwrites the acknowledgment code taken from `AK1`.
pub fn extract_acknowledgment(segments: &[Segment]) -> FunctionalAcknowledgment {
    let mut ack = FunctionalAcknowledgment::default();
    let mut transaction_set_acks = Vec::new();

    for segment in segments {
        match segment.id.as_str() {
            "AK1" => {
                ack.original_transaction_set_id = element(segment, 0);
                ack.original_control_number = element(segment, 1);
                ack.acknowledgment_code = element(segment, 2);
            }
            "AK2" => transaction_set_acks.push(TransactionSetAck {
                transaction_set_id: element(segment, 0),
                control_number: element(segment, 1),
                acknowledgment_code: element(segment, 2),
            }),
            "AK5" => ack.acknowledgment_code = element(segment, 0),
            _ => {}
        }
    }

    ack.transaction_set_acks = transaction_set_acks;
    ack
}

fn element(segment: &Segment, index: usize) -> String {
    segment.element_or_empty(index).to_string()
}

/// Party from an `N1` segment; needs both role code and name
fn party(segment: &Segment) -> Option<Party> {
    if segment.element_count() < 2 {
        return None;
    }
    Some(Party::new(element(segment, 0), element(segment, 1)))
}

/// Line item from a `PO1` or `IT1` segment
fn line_item(segment: &Segment) -> Result<LineItem> {
    Ok(LineItem {
        line_number: element(segment, 0),
        quantity: Quantity {
            value: parse_number(segment, 1)?,
            unit_of_measure: element(segment, 2),
        },
        unit_price: UnitPrice {
            value: parse_number(segment, 3)?,
        },
        product: Product {
            id: element(segment, 5),
            description: element(segment, 4),
        },
    })
}

/// Parse a numeric element; only an absent or empty element reads as zero
fn parse_number(segment: &Segment, index: usize) -> Result<f64> {
    let raw = segment.element_or_empty(index);
    if raw.is_empty() {
        return Ok(0.0);
    }

    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::invalid_number(&segment.id, index + 1, segment.line_number, raw))
}
