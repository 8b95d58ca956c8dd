//! # Upstream Records
//!
//! Loosely typed rows as they come out of the persistence / forms layer, and
//! the smart constructors that turn them into checked domain types.
//!
//! ```text
//! ┌──────────────────┐   TryFrom    ┌──────────────────┐   encode()   ┌─────────┐
//! │ PaymentRecord    │ ───────────► │ PaymentRequest   │ ───────────► │ payload │
//! │ (all Option<..>) │  rejects     │ (typed, raw text)│              └─────────┘
//! └──────────────────┘  missing /   └──────────────────┘
//!                       malformed
//! ```
//!
//! Nothing from a record reaches the encoder without passing through here.

use serde::{Deserialize, Serialize};

use crate::error::{QrBillError, QrBillResult, ValidationError};
use crate::money::{Currency, Money};
use crate::types::{Address, AddressRole, Creditor, PaymentRequest};

/// An address row. Every column may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressRecord {
    pub name: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// A creditor row: account plus flattened address columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditorRecord {
    pub iban: Option<String>,
    #[serde(flatten)]
    pub address: AddressRecord,
}

/// A payment row, e.g. an invoice joined with its customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentRecord {
    pub creditor: CreditorRecord,
    pub debtor: Option<AddressRecord>,
    /// Decimal string, e.g. `"1994.75"`.
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub reference: Option<String>,
    pub message: Option<String>,
}

fn require(value: Option<String>, field: &str) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ValidationError::Required {
            field: field.to_string(),
        })
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AddressRecord {
    /// Converts to an [`Address`], tagging failures with `role`.
    pub fn into_address(self, role: AddressRole) -> QrBillResult<Address> {
        let tag = |source| QrBillError::address(role, source);

        Ok(Address {
            name: require(self.name, "name").map_err(tag)?,
            street: require(self.street, "street").map_err(tag)?,
            house_number: blank_to_none(self.house_number),
            postal_code: require(self.postal_code, "postal_code").map_err(tag)?,
            city: require(self.city, "city").map_err(tag)?,
            country: require(self.country, "country").map_err(tag)?,
        })
    }

    /// True when every column is empty, i.e. no debtor was captured.
    pub fn is_blank(&self) -> bool {
        [
            &self.name,
            &self.street,
            &self.house_number,
            &self.postal_code,
            &self.city,
            &self.country,
        ]
        .iter()
        .all(|v| v.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

impl TryFrom<AddressRecord> for Address {
    type Error = QrBillError;

    /// Treats the record as a debtor address.
    fn try_from(record: AddressRecord) -> Result<Self, Self::Error> {
        record.into_address(AddressRole::Debtor)
    }
}

impl TryFrom<CreditorRecord> for Creditor {
    type Error = QrBillError;

    fn try_from(record: CreditorRecord) -> Result<Self, Self::Error> {
        let account = blank_to_none(record.iban).ok_or_else(|| QrBillError::InvalidAccount {
            reason: "account identifier is missing".to_string(),
        })?;
        let address = record.address.into_address(AddressRole::Creditor)?;
        Ok(Creditor { account, address })
    }
}

impl TryFrom<PaymentRecord> for PaymentRequest {
    type Error = QrBillError;

    fn try_from(record: PaymentRecord) -> Result<Self, Self::Error> {
        let creditor = Creditor::try_from(record.creditor)?;

        let debtor = match record.debtor {
            Some(d) if !d.is_blank() => Some(d.into_address(AddressRole::Debtor)?),
            _ => None,
        };

        let amount = blank_to_none(record.amount)
            .map(|raw| Money::parse_decimal(&raw).map_err(QrBillError::Amount))
            .transpose()?;

        let currency: Currency = blank_to_none(record.currency)
            .ok_or_else(|| QrBillError::UnsupportedCurrency(String::new()))?
            .parse()?;

        Ok(PaymentRequest {
            creditor,
            debtor,
            amount,
            currency,
            reference: blank_to_none(record.reference),
            message: blank_to_none(record.message),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
