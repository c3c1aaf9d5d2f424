//! Character-width normalization for parser input.
//!
//! JUMAN/KNP expect full-width text. Input is first NFKC-folded, which
//! collapses half-width katakana (ｶﾞ → ガ) and compatibility forms but also
//! rewrites full-width ASCII down to half-width, so a second pass lifts every
//! ASCII character back up to its full-width counterpart.

use unicode_normalization::UnicodeNormalization;

/// Normalize `text` to the full-width form the parser expects.
pub fn to_fullwidth(text: &str) -> String {
    text.nfkc().map(fullwidth_char).collect()
}

fn fullwidth_char(c: char) -> char {
    match c {
        ' ' => '\u{3000}',
        '!'..='~' => {
            // U+0021..U+007E map to U+FF01..U+FF5E at a fixed offset
            char::from_u32(c as u32 + 0xFEE0).unwrap_or(c)
        }
        _ => c,
    }
}
