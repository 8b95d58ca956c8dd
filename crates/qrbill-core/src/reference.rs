//! # Reference Engine
//!
//! Determines the reference type of a payment and enforces the binding
//! between reference format and account subtype.
//!
//! ## Decision Table
//! ```text
//! ┌────────────┬───────────┬──────────────────────────────┬─────────────────┐
//! │ account    │ reference │ shape                        │ result          │
//! ├────────────┼───────────┼──────────────────────────────┼─────────────────┤
//! │ restricted │ none      │ -                            │ MissingReference│
//! │ restricted │ present   │ 27 digits, mod-10 ok         │ QRR             │
//! │ restricted │ present   │ anything else                │ InvalidReference│
//! │ general    │ none      │ -                            │ NON             │
//! │ general    │ present   │ RF.., 5-25 chars, mod-97 ok  │ SCOR            │
//! │ general    │ present   │ 27 digits                    │ NumericRef...   │
//! │ general    │ present   │ RF-shaped, bad check digits  │ InvalidReference│
//! │ general    │ present   │ anything else                │ Unrecognized    │
//! └────────────┴───────────┴──────────────────────────────┴─────────────────┘
//! ```
//!
//! A mismatch is always an error, never a silent downgrade to `NON`.

use tracing::debug;

use crate::account::AccountInfo;
use crate::checksum::{is_valid_mod10, is_valid_mod97, mod10_check_digit, mod97_check_digits};
use crate::error::{QrBillError, QrBillResult, ValidationError};
use crate::types::ReferenceType;

/// Length of a QR reference including its check digit.
pub const QR_REFERENCE_LENGTH: usize = 27;

/// Shortest and longest ISO 11649 creditor reference.
pub const CREDITOR_REFERENCE_MIN: usize = 5;
pub const CREDITOR_REFERENCE_MAX: usize = 25;

const CREDITOR_REFERENCE_PREFIX: &str = "RF";

// =============================================================================
// Shape Checks
// =============================================================================

/// Strips all whitespace and uppercases.
pub fn normalize_reference(reference: &str) -> String {
    reference
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase()
}

fn is_numeric_shape(reference: &str) -> bool {
    reference.len() == QR_REFERENCE_LENGTH && reference.chars().all(|c| c.is_ascii_digit())
}

fn is_creditor_reference_shape(reference: &str) -> bool {
    let len = reference.len();
    reference.starts_with(CREDITOR_REFERENCE_PREFIX)
        && (CREDITOR_REFERENCE_MIN..=CREDITOR_REFERENCE_MAX).contains(&len)
        && reference.chars().all(|c| c.is_ascii_alphanumeric())
        && reference[2..4].chars().all(|c| c.is_ascii_digit())
}

/// Returns true if `reference` is a 27-digit QR reference with a valid check digit.
pub fn validate_numeric_reference(reference: &str) -> bool {
    let normalized = normalize_reference(reference);
    is_numeric_shape(&normalized) && is_valid_mod10(&normalized)
}

/// Returns true if `reference` is a well-formed ISO 11649 reference.
pub fn validate_creditor_reference(reference: &str) -> bool {
    let normalized = normalize_reference(reference);
    is_creditor_reference_shape(&normalized) && is_valid_mod97(&normalized)
}

// =============================================================================
// Determination
// =============================================================================

/// Determines the reference type for `account` and validates `reference`
/// against it.
///
/// A reference that is blank after whitespace removal counts as absent.
///
/// ## Example
/// ```rust
/// use qrbill_core::account::classify;
/// use qrbill_core::reference::determine_and_validate;
/// use qrbill_core::types::ReferenceType;
///
/// let qr_iban = classify("CH4431999123000889012").unwrap();
/// let kind = determine_and_validate(&qr_iban, Some("21 00000 00003 13947 14300 09017")).unwrap();
/// assert_eq!(kind, ReferenceType::QrReference);
///
/// let iban = classify("CH9300762011623852957").unwrap();
/// assert_eq!(determine_and_validate(&iban, None).unwrap(), ReferenceType::None);
/// ```
pub fn determine_and_validate(
    account: &AccountInfo,
    reference: Option<&str>,
) -> QrBillResult<ReferenceType> {
    let normalized = reference
        .map(normalize_reference)
        .filter(|r| !r.is_empty());

    let kind = if account.is_restricted_reference {
        determine_for_restricted(normalized.as_deref())?
    } else {
        determine_for_general(normalized.as_deref())?
    };

    debug!(
        reference_type = %kind,
        restricted = account.is_restricted_reference,
        "Reference type determined"
    );
    Ok(kind)
}

fn determine_for_restricted(reference: Option<&str>) -> QrBillResult<ReferenceType> {
    let Some(reference) = reference else {
        return Err(QrBillError::MissingReference);
    };

    if !is_numeric_shape(reference) {
        return Err(QrBillError::InvalidReference {
            reference: reference.to_string(),
            reason: "restricted-reference accounts accept only 27-digit QR references"
                .to_string(),
        });
    }
    if !is_valid_mod10(reference) {
        return Err(QrBillError::InvalidReference {
            reference: reference.to_string(),
            reason: "check digit does not match (mod-10)".to_string(),
        });
    }

    Ok(ReferenceType::QrReference)
}

fn determine_for_general(reference: Option<&str>) -> QrBillResult<ReferenceType> {
    let Some(reference) = reference else {
        return Ok(ReferenceType::None);
    };

    if is_numeric_shape(reference) {
        return Err(QrBillError::NumericReferenceOnGeneralAccount {
            reference: reference.to_string(),
        });
    }
    if is_creditor_reference_shape(reference) {
        if is_valid_mod97(reference) {
            return Ok(ReferenceType::CreditorReference);
        }
        return Err(QrBillError::InvalidReference {
            reference: reference.to_string(),
            reason: "check digits do not match (mod-97)".to_string(),
        });
    }

    Err(QrBillError::UnrecognizedReference {
        reference: reference.to_string(),
    })
}

// =============================================================================
// Generation
// =============================================================================

/// Builds a QR reference from any seed, e.g. an invoice number.
///
/// Digits are extracted from the seed, left-padded with zeros to 26 digits
/// (keeping the rightmost 26 if there are more) and the mod-10 check digit
/// is appended.
///
/// ## Example
/// ```rust
/// use qrbill_core::reference::{generate_numeric_reference, validate_numeric_reference};
///
/// let reference = generate_numeric_reference("RE-2026-00042");
/// assert_eq!(reference, "000000000000000002026000429");
/// assert!(validate_numeric_reference(&reference));
/// ```
pub fn generate_numeric_reference(seed: &str) -> String {
    let digits: Vec<char> = seed.chars().filter(|c| c.is_ascii_digit()).collect();
    let body_len = QR_REFERENCE_LENGTH - 1;
    let tail = &digits[digits.len().saturating_sub(body_len)..];

    let mut body = String::with_capacity(QR_REFERENCE_LENGTH);
    body.extend(std::iter::repeat('0').take(body_len - tail.len()));
    body.extend(tail.iter());

    // body holds only ASCII digits, so the check digit always exists
    let check = mod10_check_digit(&body).unwrap_or(0);
    body.push(char::from(b'0' + check as u8));
    body
}

/// Builds an ISO 11649 creditor reference (`RFxx...`) from an alphanumeric body.
///
/// Non-alphanumeric characters are dropped; the remaining body must be
/// 1–21 characters.
pub fn generate_creditor_reference(body: &str) -> QrBillResult<String> {
    let body: String = body
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_uppercase();

    let max_body = CREDITOR_REFERENCE_MAX - 4;
    if body.is_empty() || body.len() > max_body {
        return Err(QrBillError::InvalidReference {
            reference: body.clone(),
            reason: ValidationError::OutOfRange {
                field: "reference body length".to_string(),
                min: "1".to_string(),
                max: max_body.to_string(),
            }
            .to_string(),
        });
    }

    let check = mod97_check_digits(CREDITOR_REFERENCE_PREFIX, &body).ok_or_else(|| {
        QrBillError::InvalidReference {
            reference: body.clone(),
            reason: "body must be alphanumeric".to_string(),
        }
    })?;
    Ok(format!("{CREDITOR_REFERENCE_PREFIX}{check}{body}"))
}

/// Groups a reference for the human-readable part of the slip.
///
/// QR references are grouped `2 + 5×5` from the left, everything else in
/// blocks of four.
pub fn format_reference_for_display(reference: &str) -> String {
    let normalized = normalize_reference(reference);
    let chars: Vec<char> = normalized.chars().collect();

    let mut groups: Vec<String> = Vec::new();
    if is_numeric_shape(&normalized) {
        groups.push(chars[..2].iter().collect());
        groups.extend(chars[2..].chunks(5).map(|c| c.iter().collect::<String>()));
    } else {
        groups.extend(chars.chunks(4).map(|c| c.iter().collect::<String>()));
    }
    groups.join(" ")
}

// =============================================================================
// Unit Tests
// =============================================================================
