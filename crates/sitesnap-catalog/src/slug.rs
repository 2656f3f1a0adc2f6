//! Slug codec.
//!
//! Slugs are the lowercase, hyphenated identifiers used in every route and viewer query
//! parameter. The codec is lossy: punctuation is dropped and casing is not recoverable.

/// Converts display text into a slug.
///
/// The algorithm:
/// 1. Lowercase the text
/// 2. Drop every character that is not alphanumeric, `_`, a space or a hyphen
/// 3. Collapse each run of spaces and hyphens into a single hyphen
///
/// Applying `slugify` to its own output returns the same string.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_gap = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c == ' ' || c == '-' {
            if !in_gap {
                slug.push('-');
            }
            in_gap = true;
        } else if c.is_alphanumeric() || c == '_' {
            slug.push(c);
            in_gap = false;
        }
    }

    slug
}

/// Best-effort inverse of [`slugify`]: splits on hyphens, title-cases each token and joins
/// them with spaces. Empty tokens are skipped.
pub fn unslugify(slug: &str) -> String {
    slug.split('-')
        .filter(|token| !token.is_empty())
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercases the first character of `word`, leaving the rest untouched.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
