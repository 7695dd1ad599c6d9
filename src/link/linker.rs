//! Exact-match linking of raw references to corpus titles
//!
//! A reference links only when its normalized candidate title is exactly a
//! canonical title of the corpus. There is no fuzzy matching: similarity
//! ratios produced unpredictable false positives.

use super::reference::RawReference;
use crate::normalize::normalize_title;
use crate::record::{Corpus, MetadataRecord};
use crate::report::BatchReport;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Raw references per record uid
pub type RawReferences = BTreeMap<String, Vec<RawReference>>;

/// Linked canonical titles per record uid
pub type LinkedReferences = BTreeMap<String, BTreeSet<String>>;

/// The corpus's canonical-title set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownTitles(HashSet<String>);

impl KnownTitles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[MetadataRecord]) -> Self {
        records.iter().map(|r| r.canonical_title.clone()).collect()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.0.contains(title)
    }

    pub fn insert(&mut self, title: impl Into<String>) -> bool {
        self.0.insert(title.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for KnownTitles {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Linking result for one record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkOutcome {
    pub linked: BTreeSet<String>,
    /// References with a candidate title not found in the corpus
    pub unresolved: usize,
}

/// Resolve references against the known titles, counting the misses.
///
/// A candidate that normalizes to the empty key (a bare number, a citation
/// marker) is never a title and always counts as unresolved.
pub fn resolve_references(references: &[RawReference], known: &KnownTitles) -> LinkOutcome {
    let mut outcome = LinkOutcome::default();
    for reference in references {
        let Some(candidate) = reference.candidate_title() else {
            continue;
        };
        let title = normalize_title(candidate);
        if !title.is_empty() && known.contains(&title) {
            outcome.linked.insert(title);
        } else {
            outcome.unresolved += 1;
        }
    }
    outcome
}

/// Canonical titles of the corpus papers that `record` cites.
///
/// Unmatched references are dropped; they cite papers outside the corpus.
pub fn link_references(
    record: &MetadataRecord,
    references: &[RawReference],
    known: &KnownTitles,
) -> BTreeSet<String> {
    let outcome = resolve_references(references, known);
    tracing::debug!(
        uid = %record.uid,
        linked = outcome.linked.len(),
        unresolved = outcome.unresolved,
        "linked references"
    );
    outcome.linked
}

/// Link every record of the corpus.
///
/// Records are linked in parallel; `known` is shared read-only. A record with
/// no entry in `raw` (for instance because extraction failed) links to the
/// empty set. Unresolved references are only reported as an aggregate count.
pub fn link_corpus(
    corpus: &Corpus,
    raw: &RawReferences,
    known: &KnownTitles,
) -> (LinkedReferences, BatchReport) {
    let outcomes: Vec<(String, LinkOutcome)> = corpus
        .records
        .par_iter()
        .map(|record| {
            let references = raw.get(&record.uid).map(Vec::as_slice).unwrap_or_default();
            (record.uid.clone(), resolve_references(references, known))
        })
        .collect();

    let mut report = BatchReport::new();
    let mut linked = LinkedReferences::new();
    for (uid, outcome) in outcomes {
        report.accepted += 1;
        report.linked_references += outcome.linked.len();
        report.unresolved_references += outcome.unresolved;
        linked.entry(uid).or_default().extend(outcome.linked);
    }

    tracing::info!(
        records = report.accepted,
        linked = report.linked_references,
        unresolved = report.unresolved_references,
        "linked corpus references"
    );
    (linked, report)
}
