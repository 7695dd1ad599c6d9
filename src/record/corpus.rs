//! Corpus snapshot assembly

use super::dedup::deduplicate_by_title;
use super::metadata::{MetadataRecord, RecordError, RecordResult};
use super::source::RawRecord;
use crate::link::KnownTitles;
use crate::normalize::{is_ambiguous_author, NormalizeOptions};
use crate::report::{BatchIssue, BatchReport};
use std::collections::HashSet;

/// The records of one pipeline run, with canonical titles made unique
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub records: Vec<MetadataRecord>,
}

impl Corpus {
    /// Wrap records that were already deduplicated (e.g. loaded from disk).
    pub fn from_records(records: Vec<MetadataRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetadataRecord> {
        self.records.iter()
    }

    /// The full canonical-title set, read-only for a linking batch.
    pub fn known_titles(&self) -> KnownTitles {
        KnownTitles::from_records(&self.records)
    }

    pub fn get(&self, uid: &str) -> Option<&MetadataRecord> {
        self.records.iter().find(|r| r.uid == uid)
    }
}

/// Build a corpus from per-item raw record results.
///
/// Items that failed to parse, lack a title, have a title without canonical
/// key, or repeat the uid of an earlier item are rejected and reported with
/// their input position. Accepted records are deduplicated by canonical title
/// in input order.
pub fn build_corpus<I>(raws: I, options: &NormalizeOptions) -> (Corpus, BatchReport)
where
    I: IntoIterator<Item = RecordResult<RawRecord>>,
{
    let mut report = BatchReport::new();
    let mut records = Vec::new();
    let mut uids = HashSet::new();

    for (index, raw) in raws.into_iter().enumerate() {
        let source_kind = raw.as_ref().ok().map(RawRecord::kind);
        let built = raw.and_then(|raw| MetadataRecord::from_source(&raw, options));
        match built {
            Ok(record) if record.canonical_title.is_empty() => {
                tracing::warn!(index, title = %record.title, "rejecting record whose title has no canonical key");
                report.push(BatchIssue::EmptyCanonicalTitle {
                    index,
                    source_kind,
                    title: record.title,
                });
            }
            Ok(record) if !uids.insert(record.uid.clone()) => {
                tracing::warn!(index, uid = %record.uid, "rejecting record with an already used uid");
                report.push(BatchIssue::DuplicateUid {
                    index,
                    uid: record.uid,
                    canonical_title: record.canonical_title,
                });
            }
            Ok(record) => {
                for author in record.authors.iter().filter(|a| is_ambiguous_author(a)) {
                    report.push(BatchIssue::AmbiguousAuthorFormat {
                        uid: record.uid.clone(),
                        author: author.clone(),
                    });
                }
                records.push(record);
            }
            Err(RecordError::MissingRequiredField { field }) => {
                tracing::warn!(index, field, "rejecting record without required field");
                report.push(BatchIssue::MissingRequiredField {
                    index,
                    source_kind,
                    field,
                });
            }
            Err(RecordError::Malformed(reason)) => {
                tracing::warn!(index, %reason, "rejecting malformed record");
                report.push(BatchIssue::MalformedRecord {
                    index,
                    source_kind,
                    reason,
                });
            }
        }
    }

    for collision in deduplicate_by_title(&mut records) {
        report.push(BatchIssue::TitleCollision {
            uid: collision.uid,
            canonical_title: collision.canonical_title,
            renamed_to: collision.renamed_to,
        });
    }

    report.accepted = records.len();
    (Corpus { records }, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SourceKind;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> RecordResult<RawRecord> {
        RawRecord::parse(value, SourceKind::BibliographyFileEntry)
    }

    #[test]
    fn rejects_titleless_records_and_keeps_the_rest() {
        let raws = vec![
            parse(json!({"title": "Graph Networks", "author": "Battaglia, Peter"})),
            parse(json!({"author": "Nobody"})),
            parse(json!({"title": "Relational Inductive Biases"})),
        ];
        let (corpus, report) = build_corpus(raws, &NormalizeOptions::default());
        assert_eq!(corpus.len(), 2);
        assert_eq!(report.accepted, 2);
        assert_eq!(
            report.issues,
            vec![BatchIssue::MissingRequiredField {
                index: 1,
                source_kind: Some(SourceKind::BibliographyFileEntry),
                field: "title",
            }]
        );
    }

    #[test]
    fn malformed_items_are_reported_not_fatal() {
        let raws = vec![parse(json!("garbage")), parse(json!({"title": "Fine"}))];
        let (corpus, report) = build_corpus(raws, &NormalizeOptions::default());
        assert_eq!(corpus.len(), 1);
        assert_eq!(report.count("malformed_record"), 1);
        assert!(matches!(
            report.issues[0],
            BatchIssue::MalformedRecord { index: 0, source_kind: None, .. }
        ));
    }

    #[test]
    fn collisions_are_reported() {
        let raws = vec![
            parse(json!({"title": "Attention Is All You Need", "year": "2017"})),
            parse(json!({"title": "attention is all you need.", "year": "2018"})),
        ];
        let (corpus, report) = build_corpus(raws, &NormalizeOptions::default());
        assert_eq!(corpus.records[1].canonical_title, "attention-is-all-you-need-2");
        assert_eq!(report.count("title_collision"), 1);
    }

    #[test]
    fn ambiguous_authors_are_reported_but_kept() {
        let raws = vec![parse(json!({"title": "T", "author": "Smith, John, Jr. and Doe, Jane"}))];
        let (corpus, report) = build_corpus(raws, &NormalizeOptions::default());
        assert_eq!(corpus.len(), 1);
        assert_eq!(report.count("ambiguous_author_format"), 1);
        assert_eq!(corpus.records[0].canonical_authors, vec!["doe", "smith"]);
    }

    #[test]
    fn title_without_canonical_key_is_rejected() {
        let raws = vec![
            parse(json!({"title": "arXiv:1706.03762"})),
            parse(json!({"title": "Real Paper"})),
        ];
        let (corpus, report) = build_corpus(raws, &NormalizeOptions::default());
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.records[0].canonical_title, "real-paper");
        assert!(!corpus.known_titles().contains(""));
        assert_eq!(report.rejected(), 1);
        assert_eq!(
            report.issues,
            vec![BatchIssue::EmptyCanonicalTitle {
                index: 0,
                source_kind: Some(SourceKind::BibliographyFileEntry),
                title: "arXiv:1706.03762".to_string(),
            }]
        );
    }

    #[test]
    fn repeated_uid_keeps_the_first_record() {
        let raws = vec![
            parse(json!({"title": "Paper A", "doi": "10.1/x"})),
            parse(json!({"title": "Paper A (extended)", "doi": "10.1/x"})),
            parse(json!({"title": "Paper B"})),
            parse(json!({"title": "Paper B"})),
        ];
        let (corpus, report) = build_corpus(raws, &NormalizeOptions::default());

        let titles: Vec<&str> = corpus.iter().map(|r| r.canonical_title.as_str()).collect();
        assert_eq!(titles, vec!["paper-a", "paper-b"]);
        assert_eq!(report.count("duplicate_uid"), 2);
        assert_eq!(report.count("title_collision"), 0);
        assert!(matches!(
            &report.issues[0],
            BatchIssue::DuplicateUid { index: 1, uid, .. } if uid == "doi:10.1/x"
        ));
    }

    #[test]
    fn known_titles_cover_every_record() {
        let raws = vec![parse(json!({"title": "One"})), parse(json!({"title": "Two"}))];
        let (corpus, _) = build_corpus(raws, &NormalizeOptions::default());
        let known = corpus.known_titles();
        assert!(known.contains("one"));
        assert!(known.contains("two"));
        assert_eq!(known.len(), 2);
    }
}
