//! Canonical author keys
//!
//! Authors are keyed by surname plus (optionally) initials. The default keeps
//! the surname alone, so two authors sharing a surname share a key.

use super::slug::{slugify, SEPARATOR};
use super::NormalizeOptions;

/// Normalize a raw author string into its canonical key.
pub fn normalize_author(raw: &str, options: &NormalizeOptions) -> String {
    if is_ambiguous_author(raw) {
        tracing::warn!(author = raw, "more than one comma in author name");
    }
    let slug = preprocess_author(raw);
    crop_author_names(&slug, options.max_nonlast_names)
}

/// True when the author string has more than one comma, so the
/// "last, rest" reading is only a guess.
pub fn is_ambiguous_author(raw: &str) -> bool {
    raw.matches(',').count() > 1
}

/// Reorder and slugify an author string without cropping.
///
/// `"Smith, John"` and `"John Smith"` both become `"john-smith"`. Hyphenated
/// names are split into separate tokens.
pub fn preprocess_author(raw: &str) -> String {
    let without_digits: String = raw.chars().filter(|c| !c.is_ascii_digit()).collect();
    let collapsed = without_digits
        .split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let reordered = if collapsed.contains(',') {
        collapsed.split(',').rev().collect::<Vec<_>>().join(" ")
    } else {
        collapsed
    };

    slugify(&reordered.replace('-', " "))
}

/// Reduce every non-last token to its initial and keep at most
/// `max_nonlast_names` of them before the last name.
///
/// Expects a slug as produced by [`preprocess_author`].
pub fn crop_author_names(slug: &str, max_nonlast_names: Option<usize>) -> String {
    let mut tokens: Vec<&str> = slug.split(SEPARATOR).collect();
    let Some(last) = tokens.pop() else {
        return String::new();
    };
    if tokens.is_empty() {
        return last.to_string();
    }

    let limit = max_nonlast_names.unwrap_or(usize::MAX);
    let mut cropped: Vec<&str> = tokens
        .iter()
        .map(|tok| tok.char_indices().nth(1).map_or(*tok, |(end, _)| &tok[..end]))
        .take(limit)
        .collect();
    cropped.push(last);
    cropped.join(&SEPARATOR.to_string())
}
