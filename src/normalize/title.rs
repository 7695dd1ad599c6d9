//! Canonical title keys

use super::slug::{slugify, SEPARATOR};

/// Standalone tokens left over from author lists ("Vaswani et al.")
const DROPPED_TOKENS: [&str; 2] = ["et", "al"];

/// Token prefixes identifying repository ids rather than title words
const DROPPED_PREFIXES: [&str; 4] = ["arxiv", "biorxiv", "preprint", "abs/"];

/// Normalize a raw title into its canonical key.
///
/// Steps, in order: lowercase, strip ASCII digits, keep only the text before the
/// first `.`, slugify, then drop `et`/`al` tokens, repository-prefixed tokens and
/// tokens containing `/`.
pub fn normalize_title(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let without_digits: String = lowered.chars().filter(|c| !c.is_ascii_digit()).collect();
    let first_sentence = without_digits.split('.').next().unwrap_or_default();
    let slug = slugify(first_sentence);

    let kept: Vec<&str> = slug
        .split(SEPARATOR)
        .filter(|tok| !DROPPED_TOKENS.contains(tok))
        .filter(|tok| !DROPPED_PREFIXES.iter().any(|p| tok.starts_with(p)))
        .filter(|tok| !tok.contains('/'))
        .collect();

    kept.join(&SEPARATOR.to_string())
}

/// Normalize a title that may be absent; `None` maps to the empty key.
pub fn normalize_title_opt(raw: Option<&str>) -> String {
    raw.map(normalize_title).unwrap_or_default()
}
