//! Identifier normalization for menu items.

/// Derive a slug from display text.
///
/// Surrounding spaces are dropped, the text is lower-cased, each run of
/// spaces becomes a single hyphen, and every character outside `[a-z0-9-]`
/// is removed.
///
/// ```
/// use popmenu_core::slugify;
///
/// assert_eq!(slugify("Add Item!"), "add-item");
/// assert_eq!(slugify("  multi   space "), "multi-space");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_spaces = false;

    for ch in text.trim_matches(' ').chars().flat_map(char::to_lowercase) {
        if ch == ' ' {
            if !in_spaces {
                slug.push('-');
            }
            in_spaces = true;
            continue;
        }
        in_spaces = false;
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
            slug.push(ch);
        }
    }

    slug
}
