//! Canonical title uniqueness
//!
//! Suffixes follow input order: the first record keeps the bare title and
//! later ones get `-2`, `-3`, ... Results are reproducible only for a fixed
//! input order, so callers that need stable keys across runs should sort first.

use super::metadata::MetadataRecord;
use std::collections::{HashMap, HashSet};

/// A rename performed to keep canonical titles unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleCollision {
    pub uid: String,
    pub canonical_title: String,
    pub renamed_to: String,
}

/// Make canonical titles unique by suffixing later duplicates.
///
/// Never drops a record. A suffixed title that is itself already taken is
/// skipped for the next free number, so the output is always unique and a
/// second pass is a no-op.
pub fn deduplicate_by_title(records: &mut [MetadataRecord]) -> Vec<TitleCollision> {
    let mut taken: HashSet<String> = HashSet::with_capacity(records.len());
    let mut last_suffix: HashMap<String, usize> = HashMap::new();
    let mut collisions = Vec::new();

    for record in records.iter_mut() {
        if taken.insert(record.canonical_title.clone()) {
            continue;
        }

        let base = record.canonical_title.clone();
        let suffix = last_suffix.entry(base.clone()).or_insert(1);
        let renamed = loop {
            *suffix += 1;
            let candidate = format!("{}-{}", base, suffix);
            if !taken.contains(&candidate) {
                break candidate;
            }
        };

        tracing::warn!(
            uid = %record.uid,
            title = %base,
            renamed_to = %renamed,
            "canonical title already exists, renaming"
        );

        taken.insert(renamed.clone());
        collisions.push(TitleCollision {
            uid: record.uid.clone(),
            canonical_title: base,
            renamed_to: renamed.clone(),
        });
        record.canonical_title = renamed;
    }

    collisions
}
