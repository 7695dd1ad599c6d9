//! Word-frequency histograms over record text fields

use super::stopwords::Stopwords;
use super::Histogram;
use crate::normalize::{slugify, tokens};
use crate::record::MetadataRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The record text field a word histogram is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextField {
    Title,
    Abstract,
}

impl TextField {
    pub const ALL: [TextField; 2] = [TextField::Abstract, TextField::Title];

    /// Raw field text; an absent abstract reads as empty
    pub fn text(self, record: &MetadataRecord) -> &str {
        match self {
            TextField::Title => &record.title,
            TextField::Abstract => record.abstract_text.as_deref().unwrap_or(""),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TextField::Title => "title",
            TextField::Abstract => "abstract",
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slugified words of `text`, in order, duplicates kept
pub fn text_words(text: &str) -> Vec<String> {
    tokens(&slugify(text)).map(str::to_string).collect()
}

/// Count words of `field` across all records, excluding stopwords.
pub fn word_frequency_histogram(
    records: &[MetadataRecord],
    field: TextField,
    stopwords: &Stopwords,
) -> Histogram<u64> {
    let mut hist = Histogram::new();
    for record in records {
        for word in text_words(field.text(record)) {
            if !stopwords.contains(&word) {
                hist.increment(word);
            }
        }
    }
    tracing::debug!(%field, terms = hist.len(), total = hist.total_count(), "counted words");
    hist
}
