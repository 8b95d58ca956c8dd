//! # Validation Module
//!
//! Turns a raw [`PaymentRequest`] into a [`ValidatedPayment`], the only
//! input the payload encoder accepts.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PaymentRequest (raw user input)                                        │
//! │       │                                                                 │
//! │       ├── encoder config            → Config                            │
//! │       ├── classify account          → InvalidAccount                    │
//! │       ├── creditor address          → Address { Creditor, field }       │
//! │       ├── debtor address (opt)      → Address { Debtor, field }         │
//! │       ├── amount range (opt)        → Amount                            │
//! │       ├── reference vs. account     → Missing/Invalid/Unrecognized...   │
//! │       └── message length            → MessageTooLong                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ValidatedPayment (sanitized, immutable)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first failure aborts; nothing partial is ever returned.

use tracing::warn;

use crate::account::{classify_with_prefixes, AccountInfo};
use crate::config::EncoderConfig;
use crate::error::{ConfigError, QrBillError, QrBillResult, ValidationError};
use crate::money::{Currency, Money};
use crate::reference::{determine_and_validate, normalize_reference};
use crate::sanitize::{char_len, sanitize, sanitize_optional};
use crate::types::{Address, AddressRole, PaymentRequest, ReferenceType};
use crate::{
    CITY_MAX, HOUSE_NUMBER_MAX, MAX_AMOUNT_CENTS, MESSAGE_MAX, MIN_AMOUNT_CENTS, NAME_MAX,
    POSTAL_CODE_MAX, STREET_MAX,
};

// =============================================================================
// Sanitized Address
// =============================================================================

/// An address whose fields are sanitized and within their limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedAddress {
    pub name: String,
    pub street: String,
    pub house_number: Option<String>,
    pub postal_code: String,
    pub city: String,
    /// Uppercase ISO 3166-1 alpha-2.
    pub country: String,
}

fn required_field(value: &str, field: &str, max: usize) -> Result<String, ValidationError> {
    let clean = sanitize(value);
    if clean.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if char_len(&clean) > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(clean)
}

fn country_field(value: &str) -> Result<String, ValidationError> {
    let clean = sanitize(value);
    if clean.is_empty() {
        return Err(ValidationError::Required {
            field: "country".to_string(),
        });
    }
    if clean.chars().count() != 2 || !clean.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "country".to_string(),
            reason: "must be a two-letter ISO 3166 code".to_string(),
        });
    }
    Ok(clean.to_ascii_uppercase())
}

fn sanitize_address_fields(address: &Address) -> Result<SanitizedAddress, ValidationError> {
    let name = required_field(&address.name, "name", NAME_MAX)?;
    let street = required_field(&address.street, "street", STREET_MAX)?;

    let house_number = sanitize_optional(address.house_number.as_deref());
    if let Some(ref number) = house_number {
        if char_len(number) > HOUSE_NUMBER_MAX {
            return Err(ValidationError::TooLong {
                field: "house_number".to_string(),
                max: HOUSE_NUMBER_MAX,
            });
        }
    }

    let postal_code = required_field(&address.postal_code, "postal_code", POSTAL_CODE_MAX)?;
    let city = required_field(&address.city, "city", CITY_MAX)?;
    let country = country_field(&address.country)?;

    Ok(SanitizedAddress {
        name,
        street,
        house_number,
        postal_code,
        city,
        country,
    })
}

/// Validates and sanitizes an address for the given role.
///
/// ## Rules (checked in this order)
/// - name: required, ≤70
/// - street: required, ≤70
/// - house number: optional, ≤16
/// - postal code: required, ≤16
/// - city: required, ≤35
/// - country: exactly two letters
///
/// All lengths are measured after sanitization.
pub fn sanitize_address(address: &Address, role: AddressRole) -> QrBillResult<SanitizedAddress> {
    sanitize_address_fields(address).map_err(|source| QrBillError::address(role, source))
}

/// Validates an address for the given role without keeping the sanitized copy.
///
/// ## Example
/// ```rust
/// use qrbill_core::types::{Address, AddressRole};
/// use qrbill_core::validation::validate_address;
///
/// let address = Address::new("Muster AG", "Bahnhofstrasse", "8001", "Zürich", "CH");
/// assert!(validate_address(&address, AddressRole::Creditor).is_ok());
///
/// let blank = Address::new("", "Bahnhofstrasse", "8001", "Zürich", "CH");
/// let err = validate_address(&blank, AddressRole::Debtor).unwrap_err();
/// assert_eq!(err.to_string(), "Debtor: name is required");
/// ```
pub fn validate_address(address: &Address, role: AddressRole) -> QrBillResult<()> {
    sanitize_address(address, role).map(|_| ())
}

// =============================================================================
// Amount & Message
// =============================================================================

/// Validates the optional amount against `0.01 ..= 999'999'999.99`.
pub fn validate_amount(amount: Option<Money>) -> QrBillResult<()> {
    let Some(amount) = amount else {
        return Ok(());
    };

    if !(MIN_AMOUNT_CENTS..=MAX_AMOUNT_CENTS).contains(&amount.cents()) {
        return Err(QrBillError::Amount(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: Money::from_cents(MIN_AMOUNT_CENTS).to_payload_string(),
            max: Money::from_cents(MAX_AMOUNT_CENTS).to_payload_string(),
        }));
    }

    Ok(())
}

/// Sanitizes the unstructured message and checks its length.
///
/// Blank messages become `None`.
pub fn validate_message(message: Option<&str>) -> QrBillResult<Option<String>> {
    let message = sanitize_optional(message);
    if let Some(ref text) = message {
        let length = char_len(text);
        if length > MESSAGE_MAX {
            return Err(QrBillError::MessageTooLong {
                length,
                max: MESSAGE_MAX,
            });
        }
    }
    Ok(message)
}

// =============================================================================
// Validated Payment
// =============================================================================

/// A payment request that passed every check, with all text sanitized.
///
/// Cannot be constructed outside this module except through
/// [`validate_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPayment {
    account: AccountInfo,
    creditor: SanitizedAddress,
    debtor: Option<SanitizedAddress>,
    amount: Option<Money>,
    currency: Currency,
    reference_type: ReferenceType,
    reference: Option<String>,
    message: Option<String>,
}

impl ValidatedPayment {
    pub fn account(&self) -> &AccountInfo {
        &self.account
    }

    pub fn is_restricted_reference(&self) -> bool {
        self.account.is_restricted_reference
    }

    pub fn creditor(&self) -> &SanitizedAddress {
        &self.creditor
    }

    pub fn debtor(&self) -> Option<&SanitizedAddress> {
        self.debtor.as_ref()
    }

    pub fn amount(&self) -> Option<Money> {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn reference_type(&self) -> ReferenceType {
        self.reference_type
    }

    /// Normalized reference (no whitespace), `None` for `NON`.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Runs the whole validation pipeline on a request.
pub fn validate_request(
    request: &PaymentRequest,
    config: &EncoderConfig,
) -> QrBillResult<ValidatedPayment> {
    validate_request_inner(request, config).inspect_err(|err| {
        warn!(error = %err, field = err.field().unwrap_or("-"), "Payment request rejected");
    })
}

fn validate_request_inner(
    request: &PaymentRequest,
    config: &EncoderConfig,
) -> QrBillResult<ValidatedPayment> {
    config.validate().map_err(|err| match err {
        ConfigError::InvalidConfig(reason) | ConfigError::LoadFailed(reason) => {
            QrBillError::Config { reason }
        }
    })?;

    let account = classify_with_prefixes(&request.creditor.account, &config.account_prefixes)?;
    let creditor = sanitize_address(&request.creditor.address, AddressRole::Creditor)?;
    let debtor = request
        .debtor
        .as_ref()
        .map(|d| sanitize_address(d, AddressRole::Debtor))
        .transpose()?;

    validate_amount(request.amount)?;

    let reference_type = determine_and_validate(&account, request.reference.as_deref())?;
    let reference = match reference_type {
        ReferenceType::None => None,
        _ => request.reference.as_deref().map(normalize_reference),
    };

    let message = validate_message(request.message.as_deref())?;

    Ok(ValidatedPayment {
        account,
        creditor,
        debtor,
        amount: request.amount,
        currency: request.currency,
        reference_type,
        reference,
        message,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
