//! Human-readable type names for graph legends.

/// Characters that separate path segments inside a type name.
const DELIMITERS: &[char] = &['<', '>', '(', ')', '[', ']', ',', ';', ' ', '&', '*'];

/// [`std::any::type_name`] with module paths stripped.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
#[must_use]
pub fn short_type_name<T: ?Sized>() -> String {
    shorten(std::any::type_name::<T>())
}

fn shorten(full: &str) -> String {
    let mut short = String::with_capacity(full.len());
    let mut segment_start = 0;
    for (idx, ch) in full.char_indices() {
        if DELIMITERS.contains(&ch) {
            push_last_segment(&mut short, &full[segment_start..idx]);
            short.push(ch);
            segment_start = idx + ch.len_utf8();
        }
    }
    push_last_segment(&mut short, &full[segment_start..]);
    short
}

fn push_last_segment(out: &mut String, path: &str) {
    out.push_str(path.rsplit("::").next().unwrap_or(path));
}
