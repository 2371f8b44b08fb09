//! Integration tests for edi-validation
//!
//! Raw documents are tokenized with the X12 adapter and run through both
//! validation stages.

use edi_adapter_x12::{extract, tokenize};
use edi_schema::{DocumentKind, TypeRegistry};
use edi_validation::{Severity, ValidationOutcome, validate_business_rules, validate_structure};

const PURCHASE_ORDER: &str = "\
ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *240115*1200*U*00501*000000001*0*P*>~
GS*PO*SENDER*RECEIVER*20240115*1200*1*X*005010~
ST*850*0001~
BEG*00*PO123456*20240115~
N1*BY*ACME CORP~
PO1*1*10*EA*25.50*WIDGET*SKU123~
SE*5*0001~
GE*1*1~
IEA*1*000000001~";

fn structure(raw: &str, kind: DocumentKind) -> ValidationOutcome {
    let descriptor = TypeRegistry::global().descriptor(kind);
    validate_structure(&tokenize(raw), descriptor)
}

fn codes(outcome: &ValidationOutcome) -> Vec<&str> {
    outcome.messages().iter().map(|m| m.code.as_str()).collect()
}

#[test]
fn test_realistic_header_only_warns_on_control_number() {
    let outcome = structure(PURCHASE_ORDER, DocumentKind::PurchaseOrder);

    assert!(outcome.is_valid());
    assert_eq!(codes(&outcome), vec!["ISA_ELEMENT_TOO_LONG"]);
    assert_eq!(outcome.messages()[0].severity, Severity::Warning);
    assert_eq!(outcome.messages()[0].field.as_deref(), Some("ISA.13"));
}

#[test]
fn test_removing_each_required_segment_is_reported() {
    let descriptor = TypeRegistry::global().descriptor(DocumentKind::PurchaseOrder);

    for required in descriptor.required_segment_ids {
        let raw: String = PURCHASE_ORDER
            .lines()
            .filter(|line| !line.starts_with(&format!("{required}*")))
            .collect::<Vec<_>>()
            .join("\n");

        let outcome = structure(&raw, DocumentKind::PurchaseOrder);

        assert!(outcome.has_errors(), "removing {required} should fail");
        let missing: Vec<_> = outcome
            .messages()
            .iter()
            .filter(|m| m.code == "MISSING_REQUIRED_SEGMENT")
            .filter_map(|m| m.field.as_deref())
            .collect();
        assert_eq!(missing, vec![*required], "removing {required}");
    }
}

#[test]
fn test_truncated_document_is_guarded() {
    let raw: String = PURCHASE_ORDER.lines().take(4).collect::<Vec<_>>().join("\n");

    let outcome = structure(&raw, DocumentKind::PurchaseOrder);

    assert!(outcome.has_errors());
    assert!(codes(&outcome).contains(&"INVALID_CLOSING_SEGMENTS"));
    let missing: Vec<_> = outcome
        .messages()
        .iter()
        .filter(|m| m.code == "MISSING_REQUIRED_SEGMENT")
        .filter_map(|m| m.field.as_deref())
        .collect();
    assert_eq!(missing, vec!["SE", "GE", "IEA"]);
}

#[test]
fn test_blank_document() {
    let outcome = structure("\n   \n~\n", DocumentKind::Invoice);

    assert_eq!(codes(&outcome), vec!["EMPTY_MESSAGE"]);
}

#[test]
fn test_zero_quantity_fails_business_rules() {
    let raw = PURCHASE_ORDER.replace("PO1*1*10*EA", "PO1*1*0*EA");
    let set = extract(DocumentKind::PurchaseOrder, &tokenize(&raw)).unwrap();

    let outcome = validate_business_rules(&set);

    assert_eq!(codes(&outcome), vec!["INVALID_QUANTITY"]);
    assert_eq!(
        outcome.messages()[0].field.as_deref(),
        Some("line_items[0].quantity")
    );
}

#[test]
fn test_outcome_json_shape() {
    let outcome = structure("GS*PO\nST*850", DocumentKind::PurchaseOrder);

    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["is_valid"], false);
    assert_eq!(json["has_errors"], true);
    assert_eq!(json["messages"][0]["code"], "INVALID_ISA_SEGMENT");
    assert_eq!(json["messages"][0]["line_number"], 1);
}
