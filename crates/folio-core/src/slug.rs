//! URL slug derivation.

use deunicode::deunicode;

/// Convert a file stem or path segment into a URL-safe slug.
///
/// The input is transliterated to ASCII and lowercased; every run of
/// characters outside `[a-z0-9]` collapses into a single `-`, and dashes at
/// either end are dropped. Returns an empty string when nothing survives.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
