//! Singular/plural matching shared by the classifier and the emoji picker.
//!
//! Inputs are expected to be lowercased already.

/// True if one string is the other plus a trailing "s" or "en".
pub(crate) fn is_plural_pair(a: &str, b: &str) -> bool {
    is_plural_of(a, b) || is_plural_of(b, a)
}

fn is_plural_of(plural: &str, singular: &str) -> bool {
    if singular.is_empty() {
        return false;
    }
    plural
        .strip_prefix(singular)
        .is_some_and(|suffix| suffix == "s" || suffix == "en")
}
