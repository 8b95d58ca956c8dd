//! Property-based tests for checksums, sanitization and payload shape.

use proptest::prelude::*;

use qrbill_core::checksum::{is_valid_mod10, is_valid_mod97, mod10_check_digit, mod97_check_digits};
use qrbill_core::reference::{
    generate_creditor_reference, generate_numeric_reference, validate_creditor_reference,
    validate_numeric_reference,
};
use qrbill_core::sanitize::{is_allowed_char, sanitize};
use qrbill_core::{encode, Address, Creditor, Currency, Money, PaymentRequest};

// =============================================================================
// Generators
// =============================================================================

/// A valid general (non-QR) account built around a random account number.
fn general_account() -> impl Strategy<Value = String> {
    "[0-9]{12}".prop_map(|account| {
        let bban = format!("00762{account}");
        let check = mod97_check_digits("CH", &bban).unwrap();
        format!("CH{check}{bban}")
    })
}

/// Free text that may contain anything, including control and non-Latin-1 chars.
fn messy_text(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..=max).prop_map(|chars| chars.into_iter().collect())
}

fn address() -> impl Strategy<Value = Address> {
    (
        "[A-Za-zÀ-ÿ ]{1,40}",
        "[A-Za-z]{1,40}",
        prop::option::of("[0-9]{1,4}[a-z]?"),
        "[0-9]{4}",
        "[A-Za-zü]{1,30}",
    )
        .prop_filter("name must not be blank", |(name, ..)| !name.trim().is_empty())
        .prop_map(|(name, street, house_number, postal_code, city)| Address {
            name,
            street,
            house_number,
            postal_code,
            city,
            country: "CH".to_string(),
        })
}

proptest! {
    #[test]
    fn mod10_check_digit_round_trips(body in "[0-9]{26}") {
        let check = mod10_check_digit(&body).unwrap();
        let full = format!("{body}{check}");
        prop_assert!(is_valid_mod10(&full));
    }

    #[test]
    fn swapping_distinct_check_digits_breaks_mod97(account in general_account()) {
        prop_assert!(is_valid_mod97(&account));

        let bytes = account.as_bytes();
        prop_assume!(bytes[2] != bytes[3]);

        let mut swapped = bytes.to_vec();
        swapped.swap(2, 3);
        let swapped = String::from_utf8(swapped).unwrap();
        prop_assert!(!is_valid_mod97(&swapped));
    }

    #[test]
    fn generated_numeric_reference_is_valid(seed in ".{0,40}") {
        let reference = generate_numeric_reference(&seed);
        prop_assert_eq!(reference.len(), 27);
        prop_assert!(validate_numeric_reference(&reference));
    }

    #[test]
    fn generated_creditor_reference_is_valid(body in "[A-Za-z0-9]{1,21}") {
        let reference = generate_creditor_reference(&body).unwrap();
        prop_assert!(validate_creditor_reference(&reference));
    }

    #[test]
    fn sanitize_is_idempotent(input in messy_text(200)) {
        let once = sanitize(&input);
        prop_assert_eq!(sanitize(&once), once.clone());
    }

    #[test]
    fn sanitize_output_is_clean(input in messy_text(200)) {
        let out = sanitize(&input);
        prop_assert!(out.chars().all(is_allowed_char));
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
        prop_assert!(!out.contains("  "));
    }

    #[test]
    fn payload_always_has_33_lines(
        account in general_account(),
        creditor in address(),
        debtor in prop::option::of(address()),
        cents in prop::option::of(1i64..=99_999_999_999),
        message in prop::option::of(messy_text(200)),
    ) {
        let mut request = PaymentRequest::new(Creditor::new(account, creditor), Currency::Chf);
        request.debtor = debtor;
        request.amount = cents.map(Money::from_cents);
        request.message = message.filter(|m| sanitize(m).chars().count() <= 140);

        let payload = encode(&request).unwrap();
        prop_assert_eq!(payload.split("\r\n").count(), 33);
    }

    #[test]
    fn qr_account_with_generated_reference_always_encodes(seed in "[A-Z]{2}-[0-9]{1,30}") {
        let request = PaymentRequest::new(
            Creditor::new(
                "CH4431999123000889012",
                Address::new("Muster AG", "Bahnhofstrasse", "8001", "Zürich", "CH"),
            ),
            Currency::Chf,
        )
        .with_reference(generate_numeric_reference(&seed));

        let payload = encode(&request).unwrap();
        let lines: Vec<&str> = payload.split("\r\n").collect();
        prop_assert_eq!(lines[27], "QRR");
        prop_assert!(is_valid_mod10(lines[28]));
    }
}
