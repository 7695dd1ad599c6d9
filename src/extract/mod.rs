//! Reference extraction collaborators
//!
//! Turning a paper's source document into raw reference strings happens
//! outside this crate. A [`ReferenceExtractor`] wraps that collaborator; a
//! failure for one record yields an empty reference list and a batch issue,
//! never a batch failure.

mod command;
mod precomputed;

pub use command::{local_pdf_path, CommandExtractor};
pub use precomputed::PrecomputedReferences;

use crate::link::{RawReference, RawReferences};
use crate::record::MetadataRecord;
use crate::report::{BatchIssue, BatchReport};
use rayon::prelude::*;
use thiserror::Error;

/// Errors from extracting one record's references
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No source document for {0}")]
    NoSource(String),

    #[error("No precomputed references for {0}")]
    NotPrecomputed(String),

    #[error("Extractor failed to start: {0}")]
    Spawn(std::io::Error),

    #[error("Extractor exited with {status}: {stderr}")]
    Command { status: String, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid extractor output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type for extraction
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Produces the raw outgoing references of one record
pub trait ReferenceExtractor: Send + Sync {
    fn extract(&self, record: &MetadataRecord) -> ExtractResult<Vec<RawReference>>;
}

/// Extract references for every record, in parallel.
///
/// Every record gets an entry; failed ones map to an empty list and are
/// reported as `ReferenceExtractionFailure`.
pub fn extract_corpus<E>(extractor: &E, records: &[MetadataRecord]) -> (RawReferences, BatchReport)
where
    E: ReferenceExtractor + ?Sized,
{
    let results: Vec<(String, ExtractResult<Vec<RawReference>>)> = records
        .par_iter()
        .map(|record| (record.uid.clone(), extractor.extract(record)))
        .collect();

    let mut report = BatchReport::new();
    let mut references = RawReferences::new();
    for (uid, result) in results {
        let refs = match result {
            Ok(refs) => {
                report.accepted += 1;
                refs
            }
            Err(e) => {
                tracing::warn!(uid = %uid, error = %e, "reference extraction failed");
                report.push(BatchIssue::ReferenceExtractionFailure {
                    uid: uid.clone(),
                    reason: e.to_string(),
                });
                Vec::new()
            }
        };
        references.insert(uid, refs);
    }

    tracing::info!(
        records = records.len(),
        failed = report.count("reference_extraction_failure"),
        "extracted raw references"
    );
    (references, report)
}
