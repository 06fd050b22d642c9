//! Key-name inflection.
//!
//! Input keys are normalized to the field naming convention (camelCase)
//! before lookup. Mutator names follow Rust convention: `set_` plus the
//! snake_case field name.

fn is_word_delimiter(c: char) -> bool {
    matches!(c, '_' | '-' | ' ')
}

/// Convert `street_address`, `street-address`, or `Street address` to
/// `streetAddress`.
///
/// Only the first character of each word is touched; the rest is kept
/// verbatim, so already camel-cased input is returned unchanged.
pub fn camelize(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut upper_next = false;
    for c in word.chars() {
        if is_word_delimiter(c) {
            upper_next = true;
            continue;
        }
        if out.is_empty() {
            out.extend(c.to_lowercase());
        } else if upper_next {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        upper_next = false;
    }
    out
}

/// Convert `streetAddress` to `street_address`.
pub fn snake_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len() + 4);
    for c in word.chars() {
        if is_word_delimiter(c) {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
        } else if c.is_uppercase() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Name of the conventional mutator for `field`.
pub fn setter_name(field: &str) -> String {
    format!("set_{}", snake_case(field))
}
