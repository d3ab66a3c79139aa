//! UTF-8 byte classification for raw row contents.
//!
//! Rows store bytes, not `String`s, so nothing here assumes the content is valid UTF-8.
//! Every helper clamps to the slice bounds: a truncated multi-byte sequence at the end of a
//! row is treated as a shorter (single-width) character instead of being read past the end.

/// Returns `true` for continuation bytes (bit pattern `10xxxxxx`).
#[inline]
pub fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Total encoded length announced by a lead byte.
///
/// - `< 0xC0` (ASCII, and stray continuation bytes) => 1
/// - `0xC0..=0xDF` => 2
/// - `0xE0..=0xEF` => 3
/// - `>= 0xF0` => 4
#[inline]
pub fn sequence_len(lead: u8) -> usize {
    match lead {
        0x00..=0xBF => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}

/// Byte length of the code point starting at `at`, clamped to the end of `bytes`.
///
/// Returns 0 when `at` is at or past the end.
pub fn char_len_at(bytes: &[u8], at: usize) -> usize {
    match bytes.get(at) {
        Some(&lead) => sequence_len(lead).min(bytes.len() - at),
        None => 0,
    }
}

/// Offset of the boundary after the code point starting at `at`.
///
/// Steps over the byte at `at` and every continuation byte that follows it, so the result is
/// never inside a continuation run even for malformed input.
pub fn next_boundary(bytes: &[u8], at: usize) -> usize {
    if at >= bytes.len() {
        return bytes.len();
    }

    let mut next = at + 1;
    while next < bytes.len() && is_continuation(bytes[next]) {
        next += 1;
    }
    next
}

/// Offset of the code point that ends right before `at`.
///
/// Moves left one byte, then keeps moving while the byte under the cursor is a continuation
/// byte. Returns 0 when `at` is 0.
pub fn prev_boundary(bytes: &[u8], at: usize) -> usize {
    let at = at.min(bytes.len());
    if at == 0 {
        return 0;
    }

    let mut prev = at - 1;
    while prev > 0 && is_continuation(bytes[prev]) {
        prev -= 1;
    }
    prev
}

/// Moves `at` left until it sits on a lead byte (or the row end).
pub fn snap_to_boundary(bytes: &[u8], at: usize) -> usize {
    let mut at = at.min(bytes.len());
    while at > 0 && at < bytes.len() && is_continuation(bytes[at]) {
        at -= 1;
    }
    at
}

/// Offset of the first byte of the last code point, or 0 for an empty row.
pub fn last_char_start(bytes: &[u8]) -> usize {
    prev_boundary(bytes, bytes.len())
}

/// Returns `true` if `at` is a valid cursor column for `bytes`.
pub fn is_boundary(bytes: &[u8], at: usize) -> bool {
    match bytes.get(at) {
        Some(&byte) => !is_continuation(byte),
        None => at == bytes.len(),
    }
}
