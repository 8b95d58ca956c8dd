//! # Error Types
//!
//! Domain-specific error types for qrbill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ValidationError  - Field-level failures (required, too long, format)  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  QrBillError      - Why a payment request was rejected                 │
//! │  ├── InvalidAccount                  (length, prefix, mod-97)          │
//! │  ├── MissingReference / InvalidReference / NumericReferenceOn...       │
//! │  ├── Address { role, field error }                                     │
//! │  ├── Amount / UnsupportedCurrency / MessageTooLong                     │
//! │  ├── Config                          (caller-built EncoderConfig)      │
//! │  └── PayloadShape                    (internal invariant, never input) │
//! │                                                                         │
//! │  ConfigError      - Loading EncoderConfig from TOML / environment      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure aborts encoding. There is no partial payload and nothing is
//! retryable: the same input always reproduces the same error.

use thiserror::Error;

use crate::types::AddressRole;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These describe a single field that does not meet its requirement. They are
/// wrapped by [`QrBillError`] to add the role or context they occurred in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty after sanitization.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long (measured after sanitization).
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Invalid format (e.g., unparsable amount, non-letter country code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Returns the name of the field this error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// QR-Bill Error
// =============================================================================

/// Reasons a payment request cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrBillError {
    /// Wrong length, wrong country prefix, bad characters or failed mod-97 check.
    #[error("Invalid account identifier: {reason}")]
    InvalidAccount { reason: String },

    /// Restricted-reference (QR-IBAN) account without a reference.
    #[error("Restricted-reference accounts require a 27-digit QR reference")]
    MissingReference,

    /// Reference has the wrong shape for the account or fails its checksum.
    #[error("Invalid reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    /// A 27-digit numeric reference was given for a general account.
    #[error("Numeric QR reference '{reference}' is not allowed on a general account")]
    NumericReferenceOnGeneralAccount { reference: String },

    /// Reference matches none of the known formats.
    #[error("Unrecognized reference format: '{reference}'")]
    UnrecognizedReference { reference: String },

    /// Creditor or debtor address violates a field rule.
    #[error("{role}: {source}")]
    Address {
        role: AddressRole,
        #[source]
        source: ValidationError,
    },

    /// Amount outside the permitted range or unparsable.
    #[error("Invalid amount: {0}")]
    Amount(#[source] ValidationError),

    /// Currency code other than CHF or EUR.
    #[error("Unsupported currency: '{0}' (expected CHF or EUR)")]
    UnsupportedCurrency(String),

    /// Unstructured message longer than allowed after sanitization.
    #[error("Message too long: {length} characters, maximum {max}")]
    MessageTooLong { length: usize, max: usize },

    /// The assembled payload does not have the mandated number of lines.
    ///
    /// This is a defect in the encoder, never a property of the input.
    #[error("Payload has {actual} lines, expected {expected}")]
    PayloadShape { expected: usize, actual: usize },

    /// The encoder configuration passed by the caller is unusable.
    #[error("Invalid encoder configuration: {reason}")]
    Config { reason: String },
}

impl QrBillError {
    /// Returns the offending field name, when the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            QrBillError::InvalidAccount { .. } => Some("account"),
            QrBillError::MissingReference
            | QrBillError::InvalidReference { .. }
            | QrBillError::NumericReferenceOnGeneralAccount { .. }
            | QrBillError::UnrecognizedReference { .. } => Some("reference"),
            QrBillError::Address { source, .. } => Some(source.field()),
            QrBillError::Amount(_) => Some("amount"),
            QrBillError::UnsupportedCurrency(_) => Some("currency"),
            QrBillError::MessageTooLong { .. } => Some("message"),
            QrBillError::PayloadShape { .. } | QrBillError::Config { .. } => None,
        }
    }

    /// Returns the address role for address violations.
    pub fn role(&self) -> Option<AddressRole> {
        match self {
            QrBillError::Address { role, .. } => Some(*role),
            _ => None,
        }
    }

    /// Returns true if the error is a reference/account mismatch.
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            QrBillError::MissingReference
                | QrBillError::InvalidReference { .. }
                | QrBillError::NumericReferenceOnGeneralAccount { .. }
                | QrBillError::UnrecognizedReference { .. }
        )
    }

    pub(crate) fn address(role: AddressRole, source: ValidationError) -> Self {
        QrBillError::Address { role, source }
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while loading [`crate::config::EncoderConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration values are inconsistent.
    #[error("Invalid encoder configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with QrBillError.
pub type QrBillResult<T> = Result<T, QrBillError>;

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "city".to_string(),
            max: 35,
        };
        assert_eq!(err.to_string(), "city must be at most 35 characters");
    }

    #[test]
    fn test_address_error_names_role_and_field() {
        let err = QrBillError::address(
            AddressRole::Debtor,
            ValidationError::Required {
                field: "postal_code".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Debtor: postal_code is required");
        assert_eq!(err.field(), Some("postal_code"));
        assert_eq!(err.role(), Some(AddressRole::Debtor));
    }

    #[test]
    fn test_reference_errors_are_categorized() {
        assert!(QrBillError::MissingReference.is_reference_error());
        assert!(QrBillError::UnrecognizedReference {
            reference: "X".into()
        }
        .is_reference_error());
        assert!(!QrBillError::UnsupportedCurrency("USD".into()).is_reference_error());
        assert_eq!(QrBillError::MissingReference.field(), Some("reference"));
    }

    #[test]
    fn test_config_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ConfigError = io.into();
        assert!(matches!(err, ConfigError::LoadFailed(_)));
    }
}
