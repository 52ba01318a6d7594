/// Longest slug that is ever persisted. Everything beyond is cut off.
pub const MAX_SLUG_LEN: usize = 100;

/// Derives a normalized, url-safe identifier from a display name.
///
/// Lower-cases the input, collapses every maximal run of non-word
/// characters into a single hyphen, strips leading and trailing hyphens
/// and truncates the result to at most [`MAX_SLUG_LEN`] characters.
/// Truncation never leaves a trailing hyphen behind.
///
/// Pure and deterministic; an empty or all-punctuation input yields an
/// empty string, which callers must treat as "do not persist".
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len().min(MAX_SLUG_LEN));
    let mut pending_hyphen = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    // only ascii was pushed, so this can not split a character
    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
