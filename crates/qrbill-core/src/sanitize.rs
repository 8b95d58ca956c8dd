//! # Text Sanitizer
//!
//! Restricts free text to the character set the payment standard allows.
//!
//! ## Rules (applied in order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Control chars  0x00–0x1F, 0x7F–0x9F        → ' '                   │
//! │  2. Anything outside 0x20–0x7E ∪ 0xA0–0xFF     → ' '                   │
//! │  3. Runs of whitespace (incl. NBSP)            → single ' '            │
//! │  4. Leading / trailing whitespace              → removed               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Length limits are always measured on the sanitized value.

/// Returns true if `c` may appear in a payload field.
#[inline]
pub fn is_allowed_char(c: char) -> bool {
    matches!(c as u32, 0x20..=0x7E | 0xA0..=0xFF)
}

/// Sanitizes a free-text field. Total and idempotent.
///
/// ## Example
/// ```rust
/// use qrbill_core::sanitize::sanitize;
///
/// assert_eq!(sanitize("  Muster\tAG\r\n"), "Muster AG");
/// assert_eq!(sanitize("Zürich"), "Zürich");
/// assert_eq!(sanitize("Caf€ 😀 Bar"), "Caf Bar");
/// ```
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    for c in input.chars() {
        let c = if is_allowed_char(c) { c } else { ' ' };
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    out
}

/// Sanitizes an optional field, mapping blank results to `None`.
pub fn sanitize_optional(input: Option<&str>) -> Option<String> {
    input.map(sanitize).filter(|s| !s.is_empty())
}

/// Truncates to at most `max` characters (not bytes).
pub fn truncate_chars(input: &str, max: usize) -> &str {
    match input.char_indices().nth(max) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

/// Counts characters the way field limits are defined.
#[inline]
pub fn char_len(input: &str) -> usize {
    input.chars().count()
}

// =============================================================================
// Unit Tests
// =============================================================================
