//! Golden payloads.
//!
//! Each vector pins the complete payload byte-for-byte. Any change to line
//! order, markers or formatting breaks these tests, which is the point:
//! scanners in the field parse these positions.

use qrbill_core::reference::generate_numeric_reference;
use qrbill_core::{
    encode, Address, Creditor, Currency, Money, PaymentRequest, QrBillError, ReferenceType,
};

fn muster_ag() -> Address {
    Address::new("Muster AG", "Bahnhofstrasse", "8001", "Zürich", "CH").with_house_number("1")
}

fn join(lines: &[&str]) -> String {
    lines.join("\r\n")
}

#[test]
fn golden_qr_reference_without_debtor() {
    let request = PaymentRequest::new(
        Creditor::new("CH44 3199 9123 0008 8901 2", muster_ag()),
        Currency::Chf,
    )
    .with_amount(Money::from_cents(199_475))
    .with_reference(generate_numeric_reference("RE-2026-00042"));

    let expected = join(&[
        "SPC",
        "0200",
        "1",
        "CH4431999123000889012",
        "S",
        "Muster AG",
        "Bahnhofstrasse",
        "1",
        "8001",
        "Zürich",
        "CH",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        "1994.75",
        "CHF",
        "S",
        "",
        "",
        "",
        "",
        "",
        "",
        "QRR",
        "000000000000000002026000429",
        "",
        "EPD",
        "",
        "",
    ]);

    assert_eq!(encode(&request).unwrap(), expected);
}

#[test]
fn golden_creditor_reference_with_debtor_and_message() {
    let debtor = Address::new("Pia-Maria Rutschmann-Schnyder", "Grosse Marktgasse", "9400", "Rorschach", "CH")
        .with_house_number("28");
    let request = PaymentRequest::new(
        Creditor::new("CH9300762011623852957", muster_ag()),
        Currency::Eur,
    )
    .with_debtor(debtor)
    .with_amount(Money::from_cents(1))
    .with_reference("RF18 5390 0754 7034")
    .with_message("Auftrag vom 15.06.2026\r\n");

    let expected = join(&[
        "SPC",
        "0200",
        "1",
        "CH9300762011623852957",
        "S",
        "Muster AG",
        "Bahnhofstrasse",
        "1",
        "8001",
        "Zürich",
        "CH",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        "0.01",
        "EUR",
        "S",
        "Pia-Maria Rutschmann-Schnyder",
        "Grosse Marktgasse",
        "28",
        "9400",
        "Rorschach",
        "CH",
        "SCOR",
        "RF18539007547034",
        "Auftrag vom 15.06.2026",
        "EPD",
        "",
        "",
    ]);

    assert_eq!(encode(&request).unwrap(), expected);
}

#[test]
fn golden_no_reference_no_amount() {
    let mut creditor_address = muster_ag();
    creditor_address.house_number = None;
    let request = PaymentRequest::new(
        Creditor::new("CH9300762011623852957", creditor_address),
        Currency::Chf,
    );

    let payload = encode(&request).unwrap();
    let lines: Vec<&str> = payload.split("\r\n").collect();

    assert_eq!(lines.len(), 33);
    assert_eq!(lines[7], "");
    assert_eq!(lines[18], "");
    assert_eq!(lines[27], ReferenceType::None.tag());
    assert_eq!(lines[28], "");
}

#[test]
fn restricted_account_rejects_iso_reference() {
    let request = PaymentRequest::new(
        Creditor::new("CH4431999123000889012", muster_ag()),
        Currency::Chf,
    )
    .with_amount(Money::from_cents(199_475))
    .with_reference("RF18539007547034");

    let err = encode(&request).unwrap_err();
    assert!(matches!(err, QrBillError::InvalidReference { .. }));
}

#[test]
fn restricted_account_requires_reference() {
    let request = PaymentRequest::new(
        Creditor::new("CH4431999123000889012", muster_ag()),
        Currency::Chf,
    );
    assert_eq!(encode(&request).unwrap_err(), QrBillError::MissingReference);
}

#[test]
fn general_account_rejects_numeric_reference() {
    let request = PaymentRequest::new(
        Creditor::new("CH9300762011623852957", muster_ag()),
        Currency::Chf,
    )
    .with_reference(generate_numeric_reference("RE-2026-001"));

    assert!(matches!(
        encode(&request).unwrap_err(),
        QrBillError::NumericReferenceOnGeneralAccount { .. }
    ));
}

#[test]
fn out_of_range_amount_rejected_before_encoding() {
    let request = PaymentRequest::new(
        Creditor::new("CH9300762011623852957", muster_ag()),
        Currency::Chf,
    )
    .with_amount(Money::from_cents(100_000_000_000));

    assert!(matches!(encode(&request).unwrap_err(), QrBillError::Amount(_)));
}
