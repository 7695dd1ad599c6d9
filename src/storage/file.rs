//! File-backed artifact store
//!
//! JSON artifacts are pretty-printed; histograms are CSV. Sets inside graphs
//! and linked references serialize as sorted arrays.

use super::csv_hist::{read_histogram, write_histogram};
use super::paths::{Artifact, DataPaths, GraphArtifact, HistogramArtifact};
use super::traits::{ArtifactStore, LabelMapping, StorageError, StorageResult};
use crate::graph::CitationGraph;
use crate::histogram::HistogramData;
use crate::link::{LinkedReferences, RawReferences};
use crate::record::MetadataRecord;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Artifact store over a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    paths: DataPaths,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        Self::with_paths(DataPaths::new(root))
    }

    pub fn with_paths(paths: DataPaths) -> StorageResult<Self> {
        fs::create_dir_all(paths.root())?;
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn exists(&self, artifact: Artifact) -> bool {
        self.paths.path(artifact).is_file()
    }

    fn write_json<T: Serialize + ?Sized>(&self, artifact: Artifact, value: &T) -> StorageResult<()> {
        let path = self.paths.path(artifact);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        tracing::info!(path = %path.display(), "saved {}", artifact);
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, artifact: Artifact) -> StorageResult<T> {
        let path = self.paths.path(artifact);
        let file = open_existing(&path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

fn open_existing(path: &Path) -> StorageResult<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
        _ => StorageError::Io(e),
    })
}

impl ArtifactStore for FileStore {
    fn save_records(&self, records: &[MetadataRecord]) -> StorageResult<()> {
        self.write_json(Artifact::Metadata, records)
    }

    fn load_records(&self) -> StorageResult<Vec<MetadataRecord>> {
        let records: Vec<MetadataRecord> = self.read_json(Artifact::Metadata)?;
        if records.is_empty() {
            return Err(StorageError::EmptyCorpus(
                self.paths.path(Artifact::Metadata).display().to_string(),
            ));
        }
        Ok(records)
    }

    fn save_raw_references(&self, references: &RawReferences) -> StorageResult<()> {
        self.write_json(Artifact::RawReferences, references)
    }

    fn load_raw_references(&self) -> StorageResult<RawReferences> {
        self.read_json(Artifact::RawReferences)
    }

    fn save_linked_references(&self, references: &LinkedReferences) -> StorageResult<()> {
        self.write_json(Artifact::LinkedReferences, references)
    }

    fn load_linked_references(&self) -> StorageResult<LinkedReferences> {
        self.read_json(Artifact::LinkedReferences)
    }

    fn save_graph(&self, kind: GraphArtifact, graph: &CitationGraph) -> StorageResult<()> {
        self.write_json(Artifact::Graph(kind), graph)
    }

    fn load_graph(&self, kind: GraphArtifact) -> StorageResult<CitationGraph> {
        self.read_json(Artifact::Graph(kind))
    }

    fn save_reduced_graph(
        &self,
        kind: GraphArtifact,
        graph: &CitationGraph,
        labels: Option<&LabelMapping>,
    ) -> StorageResult<()> {
        self.write_json(Artifact::ReducedGraph(kind), graph)?;
        if let Some(labels) = labels {
            self.write_json(Artifact::LabelMapping(kind), labels)?;
        }
        Ok(())
    }

    fn save_histogram(&self, kind: HistogramArtifact, histogram: &HistogramData) -> StorageResult<()> {
        let artifact = Artifact::Histogram(kind);
        let path = self.paths.path(artifact);
        write_histogram(BufWriter::new(File::create(&path)?), histogram)?;
        tracing::info!(path = %path.display(), "saved {}", artifact);
        Ok(())
    }

    fn load_histogram(&self, kind: HistogramArtifact) -> StorageResult<HistogramData> {
        let file = open_existing(&self.paths.path(Artifact::Histogram(kind)))?;
        read_histogram(BufReader::new(file))
    }
}
