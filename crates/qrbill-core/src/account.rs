//! # Account Identifier Classifier
//!
//! Validates the creditor account and decides whether it is a QR-IBAN.
//!
//! ## Layout of a domestic account identifier
//! ```text
//!   C H 4 4 3 1 9 9 9 1 2 3 0 0 0 8 8 9 0 1 2
//!   ├─┤ ├─┤ ├───────┤ ├─────────────────────┤
//!   │   │   │         └─ account number (12)
//!   │   │   └─ institution identifier, positions 4–8
//!   │   └─ mod-97 check digits
//!   └─ country prefix
//!
//!   institution identifier in 30000..=31999  →  restricted-reference (QR-IBAN)
//!   anything else                            →  general
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::checksum::is_valid_mod97;
use crate::error::{QrBillError, QrBillResult};

/// Exact length of a domestic account identifier.
pub const ACCOUNT_LENGTH: usize = 21;

/// Country prefix accepted when no configuration is supplied.
pub const DOMESTIC_PREFIX: &str = "CH";

/// Institution identifiers reserved for QR-IBANs. Fixed by the standard.
pub const QR_IID_RANGE: std::ops::RangeInclusive<u32> = 30_000..=31_999;

/// Outcome of classifying an account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct AccountInfo {
    /// Normalized identifier (no whitespace, uppercase).
    pub iban: String,

    /// The 5-digit institution identifier.
    pub institution_id: u32,

    /// True for QR-IBANs, which require a QR reference on every payment.
    pub is_restricted_reference: bool,
}

/// Strips all whitespace and uppercases.
pub fn normalize_account(id: &str) -> String {
    id.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Classifies an account using the domestic prefix only.
///
/// ## Example
/// ```rust
/// use qrbill_core::account::classify;
///
/// let info = classify("CH44 3199 9123 0008 8901 2").unwrap();
/// assert!(info.is_restricted_reference);
/// assert_eq!(info.institution_id, 31999);
///
/// let info = classify("CH9300762011623852957").unwrap();
/// assert!(!info.is_restricted_reference);
/// ```
pub fn classify(account: &str) -> QrBillResult<AccountInfo> {
    classify_with_prefixes(account, &[DOMESTIC_PREFIX])
}

/// Classifies an account, accepting any of `prefixes` as the country prefix.
pub fn classify_with_prefixes<S: AsRef<str>>(
    account: &str,
    prefixes: &[S],
) -> QrBillResult<AccountInfo> {
    let iban = normalize_account(account);
    let invalid = |reason: String| QrBillError::InvalidAccount { reason };

    let length = iban.chars().count();
    if length != ACCOUNT_LENGTH {
        return Err(invalid(format!(
            "expected {ACCOUNT_LENGTH} characters, got {length}"
        )));
    }
    if !iban.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid("only letters and digits are allowed".to_string()));
    }

    let prefix = &iban[..2];
    if !prefixes.iter().any(|p| p.as_ref() == prefix) {
        let allowed: Vec<&str> = prefixes.iter().map(|p| p.as_ref()).collect();
        return Err(invalid(format!(
            "country prefix '{prefix}' not accepted (allowed: {})",
            allowed.join(", ")
        )));
    }

    if !is_valid_mod97(&iban) {
        return Err(invalid("check digits do not match (mod-97)".to_string()));
    }

    let iid_str = &iban[4..9];
    let institution_id: u32 = iid_str
        .parse()
        .map_err(|_| invalid(format!("institution identifier '{iid_str}' is not numeric")))?;

    Ok(AccountInfo {
        is_restricted_reference: QR_IID_RANGE.contains(&institution_id),
        institution_id,
        iban,
    })
}

/// Returns true if the account is a valid QR-IBAN. Invalid accounts are `false`.
pub fn is_restricted_reference_account(id: &str) -> bool {
    classify(id)
        .map(|info| info.is_restricted_reference)
        .unwrap_or(false)
}

/// Groups an account identifier into blocks of four for display.
///
/// ## Example
/// ```rust
/// use qrbill_core::account::format_account_for_display;
///
/// assert_eq!(
///     format_account_for_display("CH4431999123000889012"),
///     "CH44 3199 9123 0008 8901 2"
/// );
/// ```
pub fn format_account_for_display(id: &str) -> String {
    normalize_account(id)
        .chars()
        .collect::<Vec<char>>()
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<String>>()
        .join(" ")
}

// =============================================================================
// Unit Tests
// =============================================================================
