//! # Payload Encoder
//!
//! Assembles a [`ValidatedPayment`] into the fixed-shape text block embedded
//! in the QR code.
//!
//! ## Line Layout (33 lines, 1-based)
//! ```text
//! ┌──────┬──────────────────────────────┬───────────────────────────────────┐
//! │ line │ field                        │ value                             │
//! ├──────┼──────────────────────────────┼───────────────────────────────────┤
//! │  1   │ QR type                      │ SPC                               │
//! │  2   │ version                      │ 0200                              │
//! │  3   │ coding                       │ 1                                 │
//! │  4   │ account                      │ IBAN / QR-IBAN, no spaces         │
//! │  5   │ creditor address type        │ S                                 │
//! │ 6-11 │ creditor name … country      │ sanitized, truncated              │
//! │12-18 │ ultimate creditor (reserved) │ 7 × empty                         │
//! │ 19   │ amount                       │ 1994.75 or empty                  │
//! │ 20   │ currency                     │ CHF | EUR                         │
//! │ 21   │ debtor address type          │ S                                 │
//! │22-27 │ debtor name … country        │ sanitized or 6 × empty            │
//! │ 28   │ reference type               │ QRR | SCOR | NON                  │
//! │ 29   │ reference                    │ no spaces, or empty               │
//! │ 30   │ unstructured message         │ sanitized, or empty               │
//! │ 31   │ trailer                      │ EPD                               │
//! │32-33 │ alternative procedures       │ 2 × empty                         │
//! └──────┴──────────────────────────────┴───────────────────────────────────┘
//! ```
//!
//! A wrong line count is an encoder defect and fails hard.

use tracing::{debug, error};

use crate::config::EncoderConfig;
use crate::error::{QrBillError, QrBillResult};
use crate::sanitize::truncate_chars;
use crate::types::PaymentRequest;
use crate::validation::{validate_request, SanitizedAddress, ValidatedPayment};
use crate::{
    CITY_MAX, HOUSE_NUMBER_MAX, MESSAGE_MAX, NAME_MAX, POSTAL_CODE_MAX, STREET_MAX,
};

/// Number of lines in every payload.
pub const PAYLOAD_LINES: usize = 33;

pub const QR_TYPE: &str = "SPC";
pub const VERSION: &str = "0200";
pub const CODING: &str = "1";
pub const ADDRESS_TYPE_STRUCTURED: &str = "S";
pub const TRAILER: &str = "EPD";

/// Lines reserved for the ultimate creditor block.
const ULTIMATE_CREDITOR_LINES: usize = 7;

/// Lines reserved for alternative procedures after the trailer.
const ALTERNATIVE_PROCEDURE_LINES: usize = 2;

/// Address fields per structured address block, after the type marker.
const ADDRESS_FIELDS: usize = 6;

// =============================================================================
// Public Entry Points
// =============================================================================

/// Validates a request and encodes it with the default configuration.
///
/// ## Example
/// ```rust
/// use qrbill_core::money::{Currency, Money};
/// use qrbill_core::payload::encode;
/// use qrbill_core::reference::generate_numeric_reference;
/// use qrbill_core::types::{Address, Creditor, PaymentRequest};
///
/// let creditor = Creditor::new(
///     "CH4431999123000889012",
///     Address::new("Muster AG", "Bahnhofstrasse", "8001", "Zürich", "CH")
///         .with_house_number("1"),
/// );
/// let request = PaymentRequest::new(creditor, Currency::Chf)
///     .with_amount(Money::from_cents(199_475))
///     .with_reference(generate_numeric_reference("RE-2026-00042"));
///
/// let payload = encode(&request).unwrap();
/// let lines: Vec<&str> = payload.split("\r\n").collect();
/// assert_eq!(lines.len(), 33);
/// assert_eq!(lines[18], "1994.75");
/// assert_eq!(lines[27], "QRR");
/// ```
pub fn encode(request: &PaymentRequest) -> QrBillResult<String> {
    encode_with(request, &EncoderConfig::default())
}

/// Validates a request and encodes it with an explicit configuration.
pub fn encode_with(request: &PaymentRequest, config: &EncoderConfig) -> QrBillResult<String> {
    let payment = validate_request(request, config)?;
    encode_validated(&payment, config)
}

/// Encodes an already validated payment.
pub fn encode_validated(payment: &ValidatedPayment, config: &EncoderConfig) -> QrBillResult<String> {
    let lines = payload_lines(payment);

    if lines.len() != PAYLOAD_LINES {
        error!(
            expected = PAYLOAD_LINES,
            actual = lines.len(),
            "Payload line count invariant violated"
        );
        return Err(QrBillError::PayloadShape {
            expected: PAYLOAD_LINES,
            actual: lines.len(),
        });
    }

    let payload = lines.join(config.line_ending.as_str());

    debug!(
        reference_type = %payment.reference_type(),
        has_amount = payment.amount().is_some(),
        has_debtor = payment.debtor().is_some(),
        bytes = payload.len(),
        "Payload encoded"
    );
    if config.log_payloads {
        debug!(payload = %payload, "Encoded payload");
    }

    Ok(payload)
}

// =============================================================================
// Line Assembly
// =============================================================================

/// Builds the ordered payload lines for a validated payment.
pub fn payload_lines(payment: &ValidatedPayment) -> Vec<String> {
    let mut lines: Vec<String> = Vec::with_capacity(PAYLOAD_LINES);

    // Header
    lines.push(QR_TYPE.to_string());
    lines.push(VERSION.to_string());
    lines.push(CODING.to_string());

    // Creditor
    lines.push(payment.account().iban.clone());
    lines.push(ADDRESS_TYPE_STRUCTURED.to_string());
    push_address(&mut lines, Some(payment.creditor()));

    // Ultimate creditor (reserved)
    lines.extend(std::iter::repeat(String::new()).take(ULTIMATE_CREDITOR_LINES));

    // Amount
    lines.push(
        payment
            .amount()
            .map(|m| m.to_payload_string())
            .unwrap_or_default(),
    );
    lines.push(payment.currency().code().to_string());

    // Ultimate debtor
    lines.push(ADDRESS_TYPE_STRUCTURED.to_string());
    push_address(&mut lines, payment.debtor());

    // Reference
    lines.push(payment.reference_type().tag().to_string());
    lines.push(payment.reference().unwrap_or_default().to_string());

    // Additional information
    lines.push(
        payment
            .message()
            .map(|m| truncate_chars(m, MESSAGE_MAX).to_string())
            .unwrap_or_default(),
    );
    lines.push(TRAILER.to_string());

    // Alternative procedures (reserved)
    lines.extend(std::iter::repeat(String::new()).take(ALTERNATIVE_PROCEDURE_LINES));

    lines
}

fn push_address(lines: &mut Vec<String>, address: Option<&SanitizedAddress>) {
    let Some(address) = address else {
        lines.extend(std::iter::repeat(String::new()).take(ADDRESS_FIELDS));
        return;
    };

    lines.push(truncate_chars(&address.name, NAME_MAX).to_string());
    lines.push(truncate_chars(&address.street, STREET_MAX).to_string());
    lines.push(
        address
            .house_number
            .as_deref()
            .map(|n| truncate_chars(n, HOUSE_NUMBER_MAX).to_string())
            .unwrap_or_default(),
    );
    lines.push(truncate_chars(&address.postal_code, POSTAL_CODE_MAX).to_string());
    lines.push(truncate_chars(&address.city, CITY_MAX).to_string());
    lines.push(address.country.clone());
}

// =============================================================================
// Unit Tests
// =============================================================================
