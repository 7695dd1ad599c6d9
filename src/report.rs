//! Per-item batch outcomes
//!
//! A bad record, reference or document never aborts a batch. Each one becomes
//! a [`BatchIssue`] in the run's [`BatchReport`], and the caller decides what to
//! do with it.

use crate::record::SourceKind;
use serde::Serialize;

/// A non-fatal problem with one item of a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BatchIssue {
    /// A source record lacked a required field and was rejected
    MissingRequiredField {
        index: usize,
        source_kind: Option<SourceKind>,
        field: &'static str,
    },
    /// A source record could not be read as its declared shape and was rejected
    MalformedRecord {
        index: usize,
        source_kind: Option<SourceKind>,
        reason: String,
    },
    /// A record's title normalized to the empty key and was rejected
    EmptyCanonicalTitle {
        index: usize,
        source_kind: Option<SourceKind>,
        title: String,
    },
    /// A record repeated the uid of an earlier record and was rejected
    DuplicateUid {
        index: usize,
        uid: String,
        canonical_title: String,
    },
    /// An author string had more than one comma; kept with a best-effort reading
    AmbiguousAuthorFormat { uid: String, author: String },
    /// A canonical title was already taken; the later record was renamed
    TitleCollision {
        uid: String,
        canonical_title: String,
        renamed_to: String,
    },
    /// Reference extraction failed for a document; it contributes no references
    ReferenceExtractionFailure { uid: String, reason: String },
}

impl BatchIssue {
    /// Short snake_case name of the issue kind
    pub fn kind(&self) -> &'static str {
        match self {
            BatchIssue::MissingRequiredField { .. } => "missing_required_field",
            BatchIssue::MalformedRecord { .. } => "malformed_record",
            BatchIssue::EmptyCanonicalTitle { .. } => "empty_canonical_title",
            BatchIssue::DuplicateUid { .. } => "duplicate_uid",
            BatchIssue::AmbiguousAuthorFormat { .. } => "ambiguous_author_format",
            BatchIssue::TitleCollision { .. } => "title_collision",
            BatchIssue::ReferenceExtractionFailure { .. } => "reference_extraction_failure",
        }
    }

    /// Whether the affected item was left out of the corpus
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            BatchIssue::MissingRequiredField { .. }
                | BatchIssue::MalformedRecord { .. }
                | BatchIssue::EmptyCanonicalTitle { .. }
                | BatchIssue::DuplicateUid { .. }
        )
    }
}

/// Aggregate outcome of a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    /// Items processed successfully
    pub accepted: usize,
    /// References that resolved to a corpus paper
    pub linked_references: usize,
    /// References whose title is not in the corpus (counted, not listed)
    pub unresolved_references: usize,
    pub issues: Vec<BatchIssue>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: BatchIssue) {
        self.issues.push(issue);
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: BatchReport) {
        self.accepted += other.accepted;
        self.linked_references += other.linked_references;
        self.unresolved_references += other.unresolved_references;
        self.issues.extend(other.issues);
    }

    /// Number of issues of the given kind (see [`BatchIssue::kind`]).
    pub fn count(&self, kind: &str) -> usize {
        self.issues.iter().filter(|i| i.kind() == kind).count()
    }

    pub fn rejected(&self) -> usize {
        self.issues.iter().filter(|i| i.is_rejection()).count()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Log a one-line summary of the batch.
    pub fn log_summary(&self, stage: &str) {
        tracing::info!(
            stage,
            accepted = self.accepted,
            rejected = self.rejected(),
            issues = self.issues.len(),
            linked_references = self.linked_references,
            unresolved_references = self.unresolved_references,
            "batch finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_kind() {
        let mut report = BatchReport::new();
        report.push(BatchIssue::TitleCollision {
            uid: "u".into(),
            canonical_title: "a".into(),
            renamed_to: "a-2".into(),
        });
        report.push(BatchIssue::MissingRequiredField {
            index: 3,
            source_kind: None,
            field: "title",
        });
        assert_eq!(report.count("title_collision"), 1);
        assert_eq!(report.rejected(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn merge_sums_counters() {
        let mut a = BatchReport {
            accepted: 2,
            unresolved_references: 5,
            ..Default::default()
        };
        let b = BatchReport {
            accepted: 1,
            linked_references: 4,
            issues: vec![BatchIssue::ReferenceExtractionFailure {
                uid: "x".into(),
                reason: "unreadable".into(),
            }],
            ..Default::default()
        };
        a.merge(b);
        assert_eq!(a.accepted, 3);
        assert_eq!(a.linked_references, 4);
        assert_eq!(a.unresolved_references, 5);
        assert_eq!(a.issues.len(), 1);
    }

    #[test]
    fn issues_serialize_with_kind_tag() {
        let issue = BatchIssue::AmbiguousAuthorFormat {
            uid: "u".into(),
            author: "a, b, c".into(),
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["kind"], "ambiguous_author_format");
        assert_eq!(json["author"], "a, b, c");
    }
}
