//! # Domain Types
//!
//! The payment request aggregate and its parts.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         PaymentRequest                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Creditor     │   │  Debtor (opt)   │   │   Amount/Ccy    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  account (IBAN) │   │  Address        │   │  Money (opt)    │       │
//! │  │  Address        │   │                 │   │  CHF | EUR      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  reference (opt) ──► ReferenceType: QRR | SCOR | NON  (derived)        │
//! │  message (opt)   ──► unstructured, ≤140 chars after sanitization       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All values hold raw, unsanitized user input. Nothing here is trusted until
//! [`crate::validation::validate_request`] has run.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::{Currency, Money};

// =============================================================================
// Address Role
// =============================================================================

/// Which party an address belongs to. Used to tag validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AddressRole {
    Creditor,
    Debtor,
}

impl fmt::Display for AddressRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressRole::Creditor => write!(f, "Creditor"),
            AddressRole::Debtor => write!(f, "Debtor"),
        }
    }
}

// =============================================================================
// Address
// =============================================================================

/// A structured address (separate street / house number / postal code / city).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Address {
    /// Person or company name (≤70).
    pub name: String,

    /// Street name without house number (≤70).
    pub street: String,

    /// House number (≤16).
    #[serde(default)]
    pub house_number: Option<String>,

    /// Postal code without country prefix (≤16).
    pub postal_code: String,

    /// Town (≤35).
    pub city: String,

    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
}

impl Address {
    /// Creates an address without a house number.
    pub fn new(
        name: impl Into<String>,
        street: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Address {
            name: name.into(),
            street: street.into(),
            house_number: None,
            postal_code: postal_code.into(),
            city: city.into(),
            country: country.into(),
        }
    }

    /// Sets the house number.
    pub fn with_house_number(mut self, house_number: impl Into<String>) -> Self {
        self.house_number = Some(house_number.into());
        self
    }
}

// =============================================================================
// Creditor
// =============================================================================

/// The payee: an account identifier plus an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Creditor {
    /// 21-character IBAN or QR-IBAN, whitespace allowed.
    pub account: String,

    /// Creditor address.
    pub address: Address,
}

impl Creditor {
    pub fn new(account: impl Into<String>, address: Address) -> Self {
        Creditor {
            account: account.into(),
            address,
        }
    }
}

// =============================================================================
// Payment Request
// =============================================================================

/// Everything needed to produce one QR-bill payload.
///
/// Transient: built per encoding call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentRequest {
    pub creditor: Creditor,

    /// Ultimate debtor, may be left blank on the slip.
    #[serde(default)]
    pub debtor: Option<Address>,

    /// Exact amount. `None` leaves the amount blank for the payer to fill in.
    #[serde(default)]
    pub amount: Option<Money>,

    pub currency: Currency,

    /// QR reference, creditor reference or nothing.
    #[serde(default)]
    pub reference: Option<String>,

    /// Unstructured message.
    #[serde(default)]
    pub message: Option<String>,
}

impl PaymentRequest {
    /// Creates a request with only the mandatory parts.
    pub fn new(creditor: Creditor, currency: Currency) -> Self {
        PaymentRequest {
            creditor,
            debtor: None,
            amount: None,
            currency,
            reference: None,
            message: None,
        }
    }

    pub fn with_debtor(mut self, debtor: Address) -> Self {
        self.debtor = Some(debtor);
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

// =============================================================================
// Reference Type
// =============================================================================

/// The reference kind written into the payload. Derived, never stored.
///
/// ## Binding Rule
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  account subtype      │ legal reference types                          │
/// │  ─────────────────────┼──────────────────────────────────────────────  │
/// │  restricted (QR-IBAN) │ QrReference only (mandatory)                   │
/// │  general (IBAN)       │ CreditorReference or None                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ReferenceType {
    /// 27-digit checksummed numeric reference.
    #[serde(rename = "QRR")]
    QrReference,
    /// ISO 11649 checksummed alphanumeric reference.
    #[serde(rename = "SCOR")]
    CreditorReference,
    /// No reference.
    #[serde(rename = "NON")]
    None,
}

impl ReferenceType {
    /// Returns the tag written into the payload.
    pub const fn tag(&self) -> &'static str {
        match self {
            ReferenceType::QrReference => "QRR",
            ReferenceType::CreditorReference => "SCOR",
            ReferenceType::None => "NON",
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_type_tags() {
        assert_eq!(ReferenceType::QrReference.tag(), "QRR");
        assert_eq!(ReferenceType::CreditorReference.to_string(), "SCOR");
        assert_eq!(ReferenceType::None.tag(), "NON");
    }

    #[test]
    fn test_request_builder_methods() {
        let creditor = Creditor::new(
            "CH44 3199 9123 0008 8901 2",
            Address::new("Muster AG", "Bahnhofstrasse", "8001", "Zürich", "CH")
                .with_house_number("1"),
        );
        let request = PaymentRequest::new(creditor, Currency::Chf)
            .with_amount(Money::from_cents(199_475))
            .with_message("Invoice 42");

        assert_eq!(request.amount, Some(Money::from_cents(199_475)));
        assert_eq!(request.creditor.address.house_number.as_deref(), Some("1"));
        assert!(request.debtor.is_none());
        assert!(request.reference.is_none());
    }

    #[test]
    fn test_request_deserializes_from_json() {
        let json = r#"{
            "creditor": {
                "account": "CH9300762011623852957",
                "address": {
                    "name": "Muster AG",
                    "street": "Bahnhofstrasse",
                    "postal_code": "8001",
                    "city": "Zürich",
                    "country": "CH"
                }
            },
            "amount": "1994.75",
            "currency": "EUR"
        }"#;
        let request: PaymentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.currency, Currency::Eur);
        assert_eq!(request.amount.map(|m| m.cents()), Some(199_475));
        assert!(request.creditor.address.house_number.is_none());
    }

    #[test]
    fn test_request_json_amount_must_be_decimal_string() {
        let with_amount = |amount: &str| {
            format!(
                r#"{{
                    "creditor": {{
                        "account": "CH9300762011623852957",
                        "address": {{
                            "name": "Muster AG",
                            "street": "Bahnhofstrasse",
                            "postal_code": "8001",
                            "city": "Zürich",
                            "country": "CH"
                        }}
                    }},
                    "amount": {amount},
                    "currency": "CHF"
                }}"#
            )
        };

        let request: PaymentRequest = serde_json::from_str(&with_amount(r#""1994""#)).unwrap();
        assert_eq!(request.amount, Some(Money::from_cents(199_400)));

        assert!(serde_json::from_str::<PaymentRequest>(&with_amount("1994")).is_err());
        assert!(serde_json::from_str::<PaymentRequest>(&with_amount("1994.75")).is_err());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(AddressRole::Creditor.to_string(), "Creditor");
        assert_eq!(AddressRole::Debtor.to_string(), "Debtor");
    }
}
