//! In-memory artifact store for tests and single-process runs

use super::paths::{Artifact, GraphArtifact, HistogramArtifact};
use super::traits::{ArtifactStore, LabelMapping, StorageError, StorageResult};
use crate::graph::CitationGraph;
use crate::histogram::HistogramData;
use crate::link::{LinkedReferences, RawReferences};
use crate::record::MetadataRecord;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone)]
enum Stored {
    Json(serde_json::Value),
    Histogram(HistogramData),
}

/// Artifact store holding everything in memory
///
/// JSON artifacts go through the same serde representation as the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    artifacts: DashMap<Artifact, Stored>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, artifact: Artifact) -> bool {
        self.artifacts.contains_key(&artifact)
    }

    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }

    fn put_json<T: Serialize + ?Sized>(&self, artifact: Artifact, value: &T) -> StorageResult<()> {
        let json = serde_json::to_value(value)?;
        self.artifacts.insert(artifact, Stored::Json(json));
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, artifact: Artifact) -> StorageResult<T> {
        let json = match self.artifacts.get(&artifact).map(|r| r.value().clone()) {
            Some(Stored::Json(json)) => json,
            _ => return Err(StorageError::NotFound(artifact.to_string())),
        };
        Ok(serde_json::from_value(json)?)
    }
}

impl ArtifactStore for MemoryStore {
    fn save_records(&self, records: &[MetadataRecord]) -> StorageResult<()> {
        self.put_json(Artifact::Metadata, records)
    }

    fn load_records(&self) -> StorageResult<Vec<MetadataRecord>> {
        let records: Vec<MetadataRecord> = self.get_json(Artifact::Metadata)?;
        if records.is_empty() {
            return Err(StorageError::EmptyCorpus(Artifact::Metadata.to_string()));
        }
        Ok(records)
    }

    fn save_raw_references(&self, references: &RawReferences) -> StorageResult<()> {
        self.put_json(Artifact::RawReferences, references)
    }

    fn load_raw_references(&self) -> StorageResult<RawReferences> {
        self.get_json(Artifact::RawReferences)
    }

    fn save_linked_references(&self, references: &LinkedReferences) -> StorageResult<()> {
        self.put_json(Artifact::LinkedReferences, references)
    }

    fn load_linked_references(&self) -> StorageResult<LinkedReferences> {
        self.get_json(Artifact::LinkedReferences)
    }

    fn save_graph(&self, kind: GraphArtifact, graph: &CitationGraph) -> StorageResult<()> {
        self.put_json(Artifact::Graph(kind), graph)
    }

    fn load_graph(&self, kind: GraphArtifact) -> StorageResult<CitationGraph> {
        self.get_json(Artifact::Graph(kind))
    }

    fn save_reduced_graph(
        &self,
        kind: GraphArtifact,
        graph: &CitationGraph,
        labels: Option<&LabelMapping>,
    ) -> StorageResult<()> {
        self.put_json(Artifact::ReducedGraph(kind), graph)?;
        if let Some(labels) = labels {
            self.put_json(Artifact::LabelMapping(kind), labels)?;
        }
        Ok(())
    }

    fn save_histogram(&self, kind: HistogramArtifact, histogram: &HistogramData) -> StorageResult<()> {
        self.artifacts
            .insert(Artifact::Histogram(kind), Stored::Histogram(histogram.clone()));
        Ok(())
    }

    fn load_histogram(&self, kind: HistogramArtifact) -> StorageResult<HistogramData> {
        let artifact = Artifact::Histogram(kind);
        match self.artifacts.get(&artifact).map(|r| r.value().clone()) {
            Some(Stored::Histogram(h)) => Ok(h),
            _ => Err(StorageError::NotFound(artifact.to_string())),
        }
    }
}
