// File: src/core/highlight.rs
use std::ops::Range;

/// Byte range of the first case-insensitive occurrence of `query` in `text`.
///
/// Both sides are folded one character at a time with `char::to_lowercase`.
/// A match may stop partway through a character's expansion ('İ' folds to
/// "i\u{307}", so "i" finds it); the range then covers that whole character,
/// so it always slices the original string cleanly. Context-dependent
/// folding such as final sigma is not applied.
pub fn find_literal(text: &str, query: &str) -> Option<Range<usize>> {
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return None;
    }

    for (start, _) in text.char_indices() {
        if let Some(end) = match_at(text, start, &needle) {
            return Some(start..end);
        }
    }
    None
}

fn match_at(text: &str, start: usize, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, c) in text[start..].char_indices() {
        for lower in c.to_lowercase() {
            if needle[matched] != lower {
                return None;
            }
            matched += 1;
            if matched == needle.len() {
                return Some(start + offset + c.len_utf8());
            }
        }
    }
    None
}

/// Wraps `text[range]` in a `<mark>` element carrying `class_name`.
pub fn wrap(text: &str, range: Range<usize>, class_name: &str) -> String {
    let mut out = String::with_capacity(text.len() + class_name.len() + 24);
    out.push_str(&text[..range.start]);
    out.push_str("<mark class=\"");
    out.push_str(class_name);
    out.push_str("\">");
    out.push_str(&text[range.clone()]);
    out.push_str("</mark>");
    out.push_str(&text[range.end..]);
    out
}
