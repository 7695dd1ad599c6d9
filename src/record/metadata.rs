//! The paper metadata entity

use super::source::{RawRecord, SourceFields, SourceKind};
use crate::normalize::{normalize_author, normalize_title, NormalizeOptions};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while constructing a single record
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("malformed record: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        RecordError::Malformed(e.to_string())
    }
}

/// Result type for record construction
pub type RecordResult<T> = Result<T, RecordError>;

/// Length of content-derived uids, in hex characters
const CONTENT_UID_LEN: usize = 40;

/// One paper of the corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Source id when the source has one, content uid otherwise. Never recomputed.
    pub uid: String,
    /// Which raw shape the record was built from
    pub source_kind: SourceKind,
    /// Source-native id with its tag prefix (`arxiv:...`, `doi:...`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Hash over title, author set, year and abstract
    pub content_uid: String,
    /// Free-form origin label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<i32>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub url: Option<String>,
    /// Local content file (usually a pdf)
    pub pdf_path: Option<PathBuf>,
    /// Canonical title key, possibly suffixed by deduplication
    pub canonical_title: String,
    /// Sorted, unique canonical author keys
    pub canonical_authors: Vec<String>,
}

impl MetadataRecord {
    /// Build a record from any raw source shape.
    pub fn from_source(raw: &RawRecord, options: &NormalizeOptions) -> RecordResult<Self> {
        Self::from_fields(raw.kind(), raw.fields(), options)
    }

    /// Build a record from already-extracted source fields.
    pub fn from_fields(
        source_kind: SourceKind,
        fields: SourceFields,
        options: &NormalizeOptions,
    ) -> RecordResult<Self> {
        let title = fields
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(RecordError::MissingRequiredField { field: "title" })?;

        let content_uid = content_uid(
            &title,
            &fields.authors,
            fields.year,
            fields.abstract_text.as_deref(),
        );
        let uid = fields.source_id.clone().unwrap_or_else(|| content_uid.clone());

        let canonical_title = normalize_title(&title);
        let canonical_authors = canonical_authors(&fields.authors, options);

        Ok(Self {
            uid,
            source_kind,
            source_id: fields.source_id,
            content_uid,
            origin: fields.origin,
            title,
            authors: fields.authors,
            year: fields.year,
            abstract_text: fields.abstract_text,
            url: fields.url,
            pdf_path: fields.pdf_path,
            canonical_title,
            canonical_authors,
        })
    }

    /// Content uid over this record's raw fields.
    ///
    /// Matches `content_uid` for any record built by `from_fields`; `uid` itself
    /// is never reassigned.
    pub fn assign_content_uid(&self) -> String {
        content_uid(
            &self.title,
            &self.authors,
            self.year,
            self.abstract_text.as_deref(),
        )
    }
}

/// Sorted, unique, non-empty author keys.
pub fn canonical_authors(authors: &[String], options: &NormalizeOptions) -> Vec<String> {
    authors
        .iter()
        .map(|a| normalize_author(a, options))
        .filter(|a| !a.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Content-derived uid: SHA-256 over title, author set, year and abstract.
///
/// Authors are treated as a set, so order and repetition do not change the
/// uid. Fields are separated by control characters that cannot occur in
/// ordinary bibliographic text.
pub fn content_uid(
    title: &str,
    authors: &[String],
    year: Option<i32>,
    abstract_text: Option<&str>,
) -> String {
    let author_set: BTreeSet<&str> = authors.iter().map(String::as_str).collect();

    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update([0x1f]);
    for author in author_set {
        hasher.update(author.as_bytes());
        hasher.update([0x1e]);
    }
    hasher.update([0x1f]);
    if let Some(year) = year {
        hasher.update(year.to_string().as_bytes());
    }
    hasher.update([0x1f]);
    if let Some(text) = abstract_text {
        hasher.update(text.as_bytes());
    }

    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(CONTENT_UID_LEN);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: Option<&str>, authors: &[&str]) -> SourceFields {
        SourceFields {
            title: title.map(String::from),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            year: Some(2017),
            abstract_text: Some("abstract".into()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_title_is_rejected() {
        let err = MetadataRecord::from_fields(
            SourceKind::CrawledResult,
            fields(None, &["A B"]),
            &NormalizeOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RecordError::MissingRequiredField { field: "title" }));
    }

    #[test]
    fn blank_title_is_rejected() {
        let result = MetadataRecord::from_fields(
            SourceKind::CrawledResult,
            fields(Some("   "), &[]),
            &NormalizeOptions::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn content_uid_used_without_source_id() {
        let record = MetadataRecord::from_fields(
            SourceKind::BibliographyManagerExport,
            fields(Some("Attention Is All You Need"), &["Vaswani, Ashish"]),
            &NormalizeOptions::default(),
        )
        .unwrap();
        assert_eq!(record.uid, record.content_uid);
        assert_eq!(record.uid, record.assign_content_uid());
        assert_eq!(record.uid.len(), 40);
        assert_eq!(record.canonical_title, "attention-is-all-you-need");
        assert_eq!(record.canonical_authors, vec!["vaswani"]);
    }

    #[test]
    fn source_id_wins_over_content_uid() {
        let mut f = fields(Some("T"), &[]);
        f.source_id = Some("doi:10.1/x".into());
        let record =
            MetadataRecord::from_fields(SourceKind::BibliographyFileEntry, f, &NormalizeOptions::default())
                .unwrap();
        assert_eq!(record.uid, "doi:10.1/x");
        assert_ne!(record.uid, record.content_uid);
    }

    #[test]
    fn content_uid_ignores_author_order_and_repeats() {
        let a = content_uid("t", &["x".into(), "y".into()], Some(1), None);
        let b = content_uid("t", &["y".into(), "x".into(), "x".into()], Some(1), None);
        assert_eq!(a, b);
    }

    #[test]
    fn content_uid_distinguishes_fields() {
        let base = content_uid("t", &[], Some(2000), Some("a"));
        assert_ne!(base, content_uid("t", &[], Some(2001), Some("a")));
        assert_ne!(base, content_uid("t", &[], Some(2000), None));
        assert_ne!(base, content_uid("u", &[], Some(2000), Some("a")));
    }

    #[test]
    fn canonical_authors_are_sorted_and_unique() {
        let opts = NormalizeOptions::default();
        let authors: Vec<String> = vec!["John Smith".into(), "Smith, Jane".into(), "Ada Lovelace".into()];
        assert_eq!(canonical_authors(&authors, &opts), vec!["lovelace", "smith"]);
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = MetadataRecord::from_fields(
            SourceKind::CrawledResult,
            fields(Some("Title"), &["A B"]),
            &NormalizeOptions::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["source_kind"], "crawled-result");
        assert!(json.get("abstract").is_some());
        let back: MetadataRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
