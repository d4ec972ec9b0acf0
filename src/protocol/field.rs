//! Comma-separated field extraction
//!
//! Modem telemetry (GNSS sentences, `+CBC`, `+CEREG` payloads) is a flat
//! list of comma-separated fields. Fields are addressed by zero-based index;
//! an empty field counts as absent.

use super::response::copy_terminated;

/// Return field `index` of `src`, or `None` when it is empty or missing
///
/// The last field needs no trailing comma. Nothing is trimmed, so a `\r`
/// left at the end of `src` stays part of the last field.
#[must_use]
pub fn nth_field(src: &str, index: usize) -> Option<&str> {
    src.split(',').nth(index).filter(|field| !field.is_empty())
}

/// Copy field `index` of `src` into `out`, NUL-terminated
///
/// Returns `false` without writing when the field is empty, the index is
/// never reached, or `out` cannot hold the field and its terminator.
pub fn get_field(src: &str, index: usize, out: &mut [u8]) -> bool {
    nth_field(src, index)
        .and_then(|field| copy_terminated(field.as_bytes(), out))
        .is_some()
}

/// Parse field `index` (surrounding spaces ignored)
#[must_use]
pub fn parse_field<T: core::str::FromStr>(src: &str, index: usize) -> Option<T> {
    nth_field(src, index)?.trim().parse().ok()
}

/// Number of fields in `src` (always at least one)
#[must_use]
pub fn field_count(src: &str) -> usize {
    src.bytes().filter(|&b| b == b',').count() + 1
}
