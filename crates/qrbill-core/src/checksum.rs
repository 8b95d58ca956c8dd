//! # Checksum Library
//!
//! The two check-digit schemes used by the standard.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MOD-97 (ISO 7064, IBAN / ISO 11649)                                    │
//! │    "CH4431999123000889012"                                              │
//! │      → rearrange:  "31999123000889012" + "CH44"                         │
//! │      → letters:    A=10 … Z=35   ("CH" → "1217")                        │
//! │      → remainder of the digit string mod 97 must be 1                   │
//! │                                                                         │
//! │  MOD-10 RECURSIVE (table driven)                                        │
//! │    T = [0,9,4,6,8,2,7,1,3,5]                                            │
//! │    carry = T[(carry + d) mod 10] for each digit                         │
//! │    check = (10 - carry) mod 10                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both are pure and never fail; malformed input yields `None` or `false`,
//! never a silently filtered result.

/// Substitution table of the recursive mod-10 scheme.
const MOD10_TABLE: [u32; 10] = [0, 9, 4, 6, 8, 2, 7, 1, 3, 5];

/// Remainders above this are reduced so the running value fits in a u64.
const MOD97_REDUCE_ABOVE: u64 = 999_999_999;

// =============================================================================
// Mod-97
// =============================================================================

/// Computes the remainder mod 97 of an alphanumeric string read as a number,
/// with letters expanded to two digits (A=10 … Z=35).
///
/// Returns `None` if `input` contains anything but ASCII digits and letters.
pub fn mod97_remainder(input: &str) -> Option<u32> {
    let mut remainder: u64 = 0;

    for c in input.chars() {
        let value = c.to_ascii_uppercase();
        if value.is_ascii_digit() {
            remainder = remainder * 10 + u64::from(value as u8 - b'0');
        } else if value.is_ascii_uppercase() {
            remainder = remainder * 100 + u64::from(value as u8 - b'A' + 10);
        } else {
            return None;
        }
        if remainder > MOD97_REDUCE_ABOVE {
            remainder %= 97;
        }
    }

    Some((remainder % 97) as u32)
}

/// Runs the ISO 7064 mod-97 check on a string whose first four characters
/// are a two-letter prefix and two check digits.
///
/// ## Example
/// ```rust
/// use qrbill_core::checksum::is_valid_mod97;
///
/// assert!(is_valid_mod97("CH9300762011623852957"));
/// assert!(is_valid_mod97("RF18539007547034"));
/// assert!(!is_valid_mod97("CH9400762011623852957"));
/// ```
pub fn is_valid_mod97(input: &str) -> bool {
    if input.len() < 5 || !input.is_ascii() {
        return false;
    }
    let (head, tail) = input.split_at(4);
    let prefix_ok = head[..2].chars().all(|c| c.is_ascii_alphabetic());
    let digits_ok = head[2..].chars().all(|c| c.is_ascii_digit());
    if !prefix_ok || !digits_ok {
        return false;
    }

    let rearranged = format!("{tail}{head}");
    mod97_remainder(&rearranged) == Some(1)
}

/// Computes the two check digits for `prefix` + `body`, such that
/// `prefix + digits + body` passes [`is_valid_mod97`].
pub fn mod97_check_digits(prefix: &str, body: &str) -> Option<String> {
    let remainder = mod97_remainder(&format!("{body}{prefix}00"))?;
    Some(format!("{:02}", 98 - remainder))
}

// =============================================================================
// Mod-10 Recursive
// =============================================================================

/// Computes the recursive mod-10 check digit of a digit string.
///
/// Returns `None` if `digits` contains a non-digit.
///
/// ## Example
/// ```rust
/// use qrbill_core::checksum::mod10_check_digit;
///
/// assert_eq!(mod10_check_digit("21000000000313947143000901"), Some(7));
/// assert_eq!(mod10_check_digit("12a"), None);
/// ```
pub fn mod10_check_digit(digits: &str) -> Option<u32> {
    let mut carry: u32 = 0;
    for c in digits.chars() {
        let d = c.to_digit(10)?;
        carry = MOD10_TABLE[((carry + d) % 10) as usize];
    }
    Some((10 - carry) % 10)
}

/// Returns true if the last digit of `digits` is the mod-10 check digit of the rest.
pub fn is_valid_mod10(digits: &str) -> bool {
    let Some((idx, last)) = digits.char_indices().last() else {
        return false;
    };
    match (mod10_check_digit(&digits[..idx]), last.to_digit(10)) {
        (Some(expected), Some(actual)) => expected == actual,
        _ => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod97_known_accounts() {
        assert!(is_valid_mod97("CH4431999123000889012"));
        assert!(is_valid_mod97("CH9300762011623852957"));
        assert!(is_valid_mod97("ch9300762011623852957"));
        assert!(!is_valid_mod97("CH9300762011623852958"));
    }

    #[test]
    fn test_mod97_swapped_check_digits_fail() {
        assert!(is_valid_mod97("CH9300762011623852957"));
        assert!(!is_valid_mod97("CH3900762011623852957"));
    }

    #[test]
    fn test_mod97_rejects_bad_characters() {
        assert!(!is_valid_mod97("CH93-0762011623852957"));
        assert!(!is_valid_mod97("1H9300762011623852957"));
        assert!(!is_valid_mod97("CHX300762011623852957"));
        assert!(!is_valid_mod97("CH93"));
        assert!(!is_valid_mod97("CH93007620116238529ü"));
        assert_eq!(mod97_remainder("12 3"), None);
    }

    #[test]
    fn test_mod97_creditor_reference() {
        assert!(is_valid_mod97("RF18539007547034"));
        assert!(!is_valid_mod97("RF19539007547034"));
    }

    #[test]
    fn test_mod97_check_digits() {
        assert_eq!(mod97_check_digits("RF", "539007547034").as_deref(), Some("18"));
        assert_eq!(
            mod97_check_digits("CH", "31999123000889012").as_deref(),
            Some("44")
        );
        assert_eq!(mod97_check_digits("RF", "AB-1"), None);
    }

    #[test]
    fn test_mod97_long_input_does_not_overflow() {
        let long = "9".repeat(500);
        assert!(mod97_remainder(&long).is_some());
        let letters = "Z".repeat(200);
        assert!(mod97_remainder(&letters).is_some());
    }

    #[test]
    fn test_mod10_check_digit() {
        assert_eq!(mod10_check_digit("21000000000313947143000901"), Some(7));
        assert_eq!(mod10_check_digit(""), Some(0));
        assert_eq!(mod10_check_digit("00000000000000000000000000"), Some(0));
        assert_eq!(mod10_check_digit("1x"), None);
    }

    #[test]
    fn test_mod10_validation() {
        assert!(is_valid_mod10("210000000003139471430009017"));
        assert!(!is_valid_mod10("210000000003139471430009016"));
        assert!(!is_valid_mod10(""));
        assert!(!is_valid_mod10("21000000000313947143000901x"));
    }
}
