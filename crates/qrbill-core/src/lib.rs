//! # qrbill-core: Payment Code Encoder & Validator
//!
//! Validates a payment request and encodes it into the fixed 33-line payload
//! of the Swiss QR-bill, ready to be embedded in a QR code by the rendering
//! layer.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Forms / persistence  ──►  records (smart constructors)                 │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │               ★ qrbill-core (THIS CRATE) ★                        │ │
//! │  │                                                                   │ │
//! │  │  sanitize ─► checksum ─► account ─► reference ─► validation       │ │
//! │  │                                                      │            │ │
//! │  │                                                      ▼            │ │
//! │  │                                                   payload         │ │
//! │  │                                                                   │ │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                       │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! │                                  │ 33-line CRLF string                  │
//! │                                  ▼                                      │
//! │  Rendering layer (QR image, fonts, page layout)   (not in this crate)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`sanitize`] - Restricted character set enforcement
//! - [`checksum`] - Mod-97 and recursive mod-10 check digits
//! - [`account`] - Account validation and QR-IBAN classification
//! - [`reference`] - Reference type determination and generation
//! - [`validation`] - Address, amount and message rules
//! - [`payload`] - The 33-line payload encoder
//! - [`money`] - Integer money and currencies
//! - [`records`] - Smart constructors for upstream rows
//! - [`config`] - Encoder configuration (TOML + environment)
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use qrbill_core::{encode, Address, Creditor, Currency, Money, PaymentRequest};
//! use qrbill_core::reference::generate_numeric_reference;
//!
//! let creditor = Creditor::new(
//!     "CH44 3199 9123 0008 8901 2",
//!     Address::new("Muster AG", "Bahnhofstrasse", "8001", "Zürich", "CH")
//!         .with_house_number("1"),
//! );
//! let request = PaymentRequest::new(creditor, Currency::Chf)
//!     .with_amount(Money::from_cents(199_475))
//!     .with_reference(generate_numeric_reference("RE-2026-00042"));
//!
//! let payload = encode(&request).unwrap();
//! assert!(payload.starts_with("SPC\r\n0200\r\n1\r\nCH4431999123000889012\r\n"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod account;
pub mod checksum;
pub mod config;
pub mod error;
pub mod money;
pub mod payload;
pub mod records;
pub mod reference;
pub mod sanitize;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use account::{classify, format_account_for_display, is_restricted_reference_account, AccountInfo};
pub use config::{EncoderConfig, LineEnding};
pub use error::{ConfigError, QrBillError, QrBillResult, ValidationError};
pub use money::{Currency, Money};
pub use payload::{encode, encode_with};
pub use sanitize::sanitize;
pub use types::*;
pub use validation::{validate_request, ValidatedPayment};

// =============================================================================
// Field Limits
// =============================================================================
// Maximum lengths in characters, measured after sanitization.

pub const NAME_MAX: usize = 70;
pub const STREET_MAX: usize = 70;
pub const HOUSE_NUMBER_MAX: usize = 16;
pub const POSTAL_CODE_MAX: usize = 16;
pub const CITY_MAX: usize = 35;
pub const MESSAGE_MAX: usize = 140;

/// Smallest payable amount: 0.01.
pub const MIN_AMOUNT_CENTS: i64 = 1;

/// Largest payable amount: 999'999'999.99.
pub const MAX_AMOUNT_CENTS: i64 = 99_999_999_999;
