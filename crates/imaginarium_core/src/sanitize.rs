//! Free-text input sanitizer.
//!
//! # Responsibility
//! - Clean raw user text before it becomes an item field or search token.
//!
//! # Invariants
//! - Output is non-empty, trimmed and free of control characters.
//! - Output only contains letters, digits, single ASCII spaces and the
//!   punctuation set `. , _ - @ # : / ' + ! ? ( ) & %`.
//! - Length is checked after cleaning, in characters.
//! - `sanitize_line` is idempotent on its own output.

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum item id length.
pub const ID_MAX_LEN: usize = 40;
/// Maximum item name length.
pub const NAME_MAX_LEN: usize = 80;
/// Maximum item category length.
pub const CATEGORY_MAX_LEN: usize = 80;
/// Maximum item description length.
pub const DESCRIPTION_MAX_LEN: usize = 200;
/// Maximum search token length.
pub const SEARCH_TOKEN_MAX_LEN: usize = 80;

static CONTROL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x1F\x7F]").expect("valid control regex"));
// Only the ASCII space survives as whitespace; other ASCII whitespace is a
// control character and Unicode spaces such as NBSP are not allow-listed.
static DISALLOWED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{L}\p{N} .,_\-@#:/'+!?()&%]").expect("valid allow-list regex")
});
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("valid ws regex"));

/// Sanitizes one line of free text.
///
/// Disallowed characters are dropped silently rather than rejecting the
/// whole input.
///
/// # Errors
/// - `NullInput` when `raw` is `None`.
/// - `EmptyAfterSanitize` when nothing remains after cleaning.
/// - `TooLong` when the cleaned text exceeds `max_len` characters.
pub fn sanitize_line(raw: Option<&str>, max_len: usize) -> Result<String, ValidationError> {
    let raw = raw.ok_or(ValidationError::NullInput)?;

    let without_control = CONTROL_RE.replace_all(raw, "");
    let allowed = DISALLOWED_RE.replace_all(&without_control, "");
    let collapsed = WHITESPACE_RE.replace_all(&allowed, " ");
    let cleaned = collapsed.trim();

    if cleaned.is_empty() {
        return Err(ValidationError::EmptyAfterSanitize);
    }

    let actual_len = cleaned.chars().count();
    if actual_len > max_len {
        return Err(ValidationError::TooLong {
            max_len,
            actual_len,
        });
    }

    Ok(cleaned.to_string())
}
