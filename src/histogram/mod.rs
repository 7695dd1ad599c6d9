//! Frequency histograms over words and citation counts
//!
//! A histogram maps a term (word or node key) to a frequency. Raw histograms
//! hold integer counts; [`normalize`] turns them into fractions of the total.

mod citations;
mod stats;
mod stopwords;
mod words;

pub use citations::citation_count_histogram;
pub use stats::{normalize, percentile, percentile_filter};
pub use stopwords::{Stopwords, DOMAIN_STOPWORDS, ENGLISH_STOPWORDS};
pub use words::{text_words, word_frequency_histogram, TextField};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use thiserror::Error;

/// Errors from histogram operations
#[derive(Debug, Error, PartialEq)]
pub enum HistogramError {
    #[error("Percentile must be within 0..=100, got {0}")]
    InvalidPercentile(f64),
}

/// Result type for histogram operations
pub type HistogramResult<T> = Result<T, HistogramError>;

/// A histogram value: integer count or normalized fraction
pub trait Frequency: Copy + PartialOrd + Default + fmt::Debug + Send + Sync + 'static {
    fn to_f64(self) -> f64;

    /// Text form used in CSV artifacts. Fractions always carry a `.`.
    fn to_field(self) -> String;
}

impl Frequency for u64 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn to_field(self) -> String {
        self.to_string()
    }
}

impl Frequency for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn to_field(self) -> String {
        let s = self.to_string();
        if s.contains('.') || !self.is_finite() {
            s
        } else {
            format!("{}.0", s)
        }
    }
}

/// Term -> frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram<V = u64>(BTreeMap<String, V>);

impl<V> Default for Histogram<V> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<V: Frequency> Histogram<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, term: &str) -> Option<V> {
        self.0.get(term).copied()
    }

    pub fn insert(&mut self, term: impl Into<String>, value: V) -> Option<V> {
        self.0.insert(term.into(), value)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, V> {
        self.0.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = V> + '_ {
        self.0.values().copied()
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        self.values().map(Frequency::to_f64).sum()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, V) -> bool) {
        self.0.retain(|term, value| keep(term, *value));
    }

    /// Entries by descending frequency, ties by term
    pub fn sorted_desc(&self) -> Vec<(&str, V)> {
        let mut entries: Vec<(&str, V)> = self.0.iter().map(|(t, v)| (t.as_str(), *v)).collect();
        entries.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }

    /// The same histogram with fractional values
    pub fn to_f64(&self) -> Histogram<f64> {
        self.0.iter().map(|(t, v)| (t.clone(), v.to_f64())).collect()
    }
}

impl Histogram<u64> {
    /// Add `n` occurrences of `term`
    pub fn add(&mut self, term: impl Into<String>, n: u64) {
        *self.0.entry(term.into()).or_insert(0) += n;
    }

    pub fn increment(&mut self, term: impl Into<String>) {
        self.add(term, 1);
    }

    /// Total number of counted occurrences
    pub fn total_count(&self) -> u64 {
        self.0.values().sum()
    }
}

impl<V> FromIterator<(String, V)> for Histogram<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, V> IntoIterator for &'a Histogram<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = btree_map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A histogram as stored in a CSV artifact, whose value type is only known
/// after reading it.
#[derive(Debug, Clone, PartialEq)]
pub enum HistogramData {
    Counts(Histogram<u64>),
    Normalized(Histogram<f64>),
}

impl HistogramData {
    pub fn len(&self) -> usize {
        match self {
            HistogramData::Counts(h) => h.len(),
            HistogramData::Normalized(h) => h.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_f64(&self) -> Histogram<f64> {
        match self {
            HistogramData::Counts(h) => h.to_f64(),
            HistogramData::Normalized(h) => h.clone(),
        }
    }

    /// Rows in artifact order: descending frequency, text-formatted values
    pub fn rows(&self) -> Vec<(String, String)> {
        fn rows_of<V: Frequency>(h: &Histogram<V>) -> Vec<(String, String)> {
            h.sorted_desc()
                .into_iter()
                .map(|(t, v)| (t.to_string(), v.to_field()))
                .collect()
        }
        match self {
            HistogramData::Counts(h) => rows_of(h),
            HistogramData::Normalized(h) => rows_of(h),
        }
    }
}

impl From<Histogram<u64>> for HistogramData {
    fn from(h: Histogram<u64>) -> Self {
        HistogramData::Counts(h)
    }
}

impl From<Histogram<f64>> for HistogramData {
    fn from(h: Histogram<f64>) -> Self {
        HistogramData::Normalized(h)
    }
}
