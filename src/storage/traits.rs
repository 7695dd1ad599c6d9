//! Storage trait definitions

use super::paths::{GraphArtifact, HistogramArtifact};
use crate::graph::CitationGraph;
use crate::histogram::HistogramData;
use crate::link::{LinkedReferences, RawReferences};
use crate::record::MetadataRecord;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Corpus is empty: {0}")]
    EmptyCorpus(String),

    #[error("Malformed histogram row {row}: {reason}")]
    MalformedHistogram { row: usize, reason: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Label assigned to each node key of a relabeled graph
pub type LabelMapping = BTreeMap<String, usize>;

/// Trait for pipeline artifact backends
///
/// Each stage reads its inputs and writes its outputs through a store, so
/// stages can run separately. Implementations must be thread-safe.
pub trait ArtifactStore: Send + Sync {
    // === Metadata ===

    /// Save the deduplicated metadata records
    fn save_records(&self, records: &[MetadataRecord]) -> StorageResult<()>;

    /// Load metadata records; an absent or empty collection is an error
    fn load_records(&self) -> StorageResult<Vec<MetadataRecord>>;

    // === References ===

    fn save_raw_references(&self, references: &RawReferences) -> StorageResult<()>;

    fn load_raw_references(&self) -> StorageResult<RawReferences>;

    fn save_linked_references(&self, references: &LinkedReferences) -> StorageResult<()>;

    fn load_linked_references(&self) -> StorageResult<LinkedReferences>;

    // === Graphs ===

    fn save_graph(&self, kind: GraphArtifact, graph: &CitationGraph) -> StorageResult<()>;

    fn load_graph(&self, kind: GraphArtifact) -> StorageResult<CitationGraph>;

    /// Save a graph reduced for plotting, with its label mapping when relabeled
    fn save_reduced_graph(
        &self,
        kind: GraphArtifact,
        graph: &CitationGraph,
        labels: Option<&LabelMapping>,
    ) -> StorageResult<()>;

    // === Histograms ===

    fn save_histogram(&self, kind: HistogramArtifact, histogram: &HistogramData) -> StorageResult<()>;

    fn load_histogram(&self, kind: HistogramArtifact) -> StorageResult<HistogramData>;
}
