//! Label escaping for DOT output.

use std::fmt::Write;

/// Replace every character that is not an ASCII letter with its hexadecimal
/// numeric character reference (`,` becomes `&#x2C;`).
///
/// Digits, whitespace and punctuation are all escaped, so no character of the
/// label can be read as DOT record syntax (`|`, `<`, `{`, `"`) or as markup by
/// a downstream SVG consumer. Applied once, at serialization time.
#[must_use]
pub fn escape_label(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len() * 2);
    for ch in raw.chars() {
        if ch.is_ascii_alphabetic() {
            escaped.push(ch);
        } else {
            let _ = write!(escaped, "&#x{:X};", u32::from(ch));
        }
    }
    escaped
}
