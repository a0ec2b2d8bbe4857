//! Line codec for the catalog file.
//!
//! # Responsibility
//! - Encode one item as one comma-separated line.
//! - Decode one physical line back into its raw columns.
//!
//! # Invariants
//! - A field containing a comma, quote, CR or LF is quoted with inner quotes
//!   doubled; any other field is written as-is.
//! - `decode_line(&encode_item(item))` yields the item's four columns.
//! - Decoding never fails; a short column count is the caller's signal for a
//!   malformed row.
//!
//! Quoted line breaks are not protected from line-based scanning: the file
//! format is one record per physical line.

use crate::model::item::Item;
use std::borrow::Cow;

/// Fixed header written as the first line of every catalog file.
pub const CSV_HEADER: &str = "ID,Name,Category,Description";

/// Escapes one field value for writing.
pub fn escape_field(value: &str) -> Cow<'_, str> {
    let needs_quotes = value.contains([',', '"', '\n', '\r']);
    if !needs_quotes {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    escaped.push_str(&value.replace('"', "\"\""));
    escaped.push('"');
    Cow::Owned(escaped)
}

/// Encodes one item as a catalog line, without the trailing newline.
pub fn encode_item(item: &Item) -> String {
    item.columns()
        .iter()
        .map(|column| escape_field(column))
        .collect::<Vec<_>>()
        .join(",")
}

/// Splits one catalog line into raw column values.
///
/// Inside quotes `""` is a literal quote and any other quote closes the
/// quoted span; outside quotes a comma ends the column. A line may mix
/// quoted and unquoted segments within one column.
pub fn decode_line(line: &str) -> Vec<String> {
    let mut columns = Vec::with_capacity(4);
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => columns.push(std::mem::take(&mut current)),
                other => current.push(other),
            }
        }
    }
    columns.push(current);
    columns
}

/// Returns whether `line` starts with the catalog header, ignoring ASCII case.
///
/// Callers apply this to the first non-blank line of a file only.
pub fn is_header(line: &str) -> bool {
    line.get(..CSV_HEADER.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(CSV_HEADER))
}
