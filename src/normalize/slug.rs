//! Slugification shared by title, author and word tokenization

use unicode_normalization::UnicodeNormalization;

/// Separator placed between slug tokens
pub const SEPARATOR: char = '-';

/// Slugify with the default `-` separator.
pub fn slugify(text: &str) -> String {
    slugify_with(text, SEPARATOR)
}

/// Transform free text into a lowercase, accent-stripped token sequence.
///
/// Characters are NFKD-decomposed and anything outside ASCII is dropped, which
/// strips accents (`é` becomes `e`) and removes scripts with no ASCII fold.
/// Punctuation is deleted in place (`don't` becomes `dont`), and every run of
/// whitespace and hyphens collapses into a single `sep`.
pub fn slugify_with(text: &str, sep: char) -> String {
    let folded: String = text.nfkd().filter(|c| c.is_ascii()).collect();
    let lowered = folded.trim().to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut pending_sep = false;
    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_sep {
                slug.push(sep);
                pending_sep = false;
            }
            slug.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_sep = true;
        }
        // Punctuation is removed without breaking or starting a run.
    }
    if pending_sep {
        slug.push(sep);
    }
    slug
}

/// Split a slug into its non-empty tokens.
pub fn tokens(slug: &str) -> impl Iterator<Item = &str> {
    slug.split(SEPARATOR).filter(|t| !t.is_empty())
}
