//! Raw outgoing references

use serde::{Deserialize, Serialize};

/// A reference found in a paper's source document.
///
/// Extractors produce anything from a bare string to a parsed record; all
/// three JSON shapes are accepted:
///
/// ```json
/// "Vaswani et al. Attention is all you need. 2017."
/// ["attention is all you need", "vaswani"]
/// {"title": "attention is all you need", "authors": ["A. Vaswani"], "raw_ref": "..."}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawReference {
    /// Unstructured reference string
    Text(String),
    /// Extracted fields, candidate title first
    Fields(Vec<String>),
    /// Parsed reference record
    Parsed(ParsedReference),
}

/// A reference that went through a citation parser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, alias = "raw_ref", skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl RawReference {
    pub fn text(s: impl Into<String>) -> Self {
        RawReference::Text(s.into())
    }

    /// Reference with a structured candidate title alongside its raw string.
    pub fn with_title(title: impl Into<String>, raw: impl Into<String>) -> Self {
        RawReference::Parsed(ParsedReference {
            title: Some(title.into()),
            authors: Vec::new(),
            raw: Some(raw.into()),
        })
    }

    /// The string to normalize when looking for a matching corpus title.
    ///
    /// The first structured field wins; otherwise the whole raw string is used.
    /// Empty field lists have no candidate.
    pub fn candidate_title(&self) -> Option<&str> {
        match self {
            RawReference::Text(s) => Some(s),
            RawReference::Fields(fields) => fields.first().map(String::as_str),
            RawReference::Parsed(p) => p
                .title
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .or(p.raw.as_deref()),
        }
    }
}
