//! Canonicalization of bibliographic identity
//!
//! Every canonical key in the crate (titles, authors, histogram words) is
//! produced here. Other modules call these functions instead of re-deriving
//! keys, so two components can never disagree on what "the same paper" means.
//!
//! All functions are pure and total over string input.

mod author;
mod slug;
mod title;

pub use author::{crop_author_names, is_ambiguous_author, normalize_author, preprocess_author};
pub use slug::{slugify, slugify_with, tokens, SEPARATOR};
pub use title::{normalize_title, normalize_title_opt};

use serde::{Deserialize, Serialize};

/// Default number of non-last names kept in author keys
pub const DEFAULT_MAX_NONLAST_NAMES: usize = 0;

/// Options for author normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// How many initials to keep before the last name; `None` keeps all of them
    pub max_nonlast_names: Option<usize>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_nonlast_names: Some(DEFAULT_MAX_NONLAST_NAMES),
        }
    }
}
