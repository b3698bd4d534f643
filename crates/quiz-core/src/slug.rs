//! Slug derivation for categories.

/// Derive a slug from a category title.
///
/// Lower-cases the title and replaces every run of whitespace with a single
/// hyphen. No other characters are touched, so `"C++ Basics"` becomes
/// `"c++-basics"`.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for ch in title.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
        } else {
            in_whitespace = false;
            slug.extend(ch.to_lowercase());
        }
    }

    slug
}

/// Use the explicit slug when one is given and non-blank, otherwise derive it.
#[must_use]
pub fn slug_or_derive(explicit: Option<&str>, title: &str) -> String {
    match explicit {
        Some(slug) if !slug.trim().is_empty() => slug.to_string(),
        _ => slugify(title),
    }
}
