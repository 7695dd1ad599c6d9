//! Artifact names and the data directory layout

use std::fmt;
use std::path::{Path, PathBuf};

/// A citation graph artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphArtifact {
    /// title -> titles cited by the paper
    Titles,
    /// title -> titles of papers citing it
    TitlesReverse,
    /// author -> authors cited by the author
    Authors,
    /// author -> authors citing the author
    AuthorsReverse,
}

impl GraphArtifact {
    pub const ALL: [GraphArtifact; 4] = [
        GraphArtifact::Titles,
        GraphArtifact::TitlesReverse,
        GraphArtifact::Authors,
        GraphArtifact::AuthorsReverse,
    ];

    fn stem(self) -> &'static str {
        match self {
            GraphArtifact::Titles => "titles-refs-graph",
            GraphArtifact::TitlesReverse => "titles-refs-rev-graph",
            GraphArtifact::Authors => "authors-refs-graph",
            GraphArtifact::AuthorsReverse => "authors-refs-rev-graph",
        }
    }
}

/// A histogram artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistogramArtifact {
    TitleWords,
    AbstractWords,
    /// Citation counts per title
    TitleCitations,
    /// Citation counts per author
    AuthorCitations,
}

impl HistogramArtifact {
    fn stem(self) -> &'static str {
        match self {
            HistogramArtifact::TitleWords => "title-word-freqs-hist",
            HistogramArtifact::AbstractWords => "abstract-word-freqs-hist",
            HistogramArtifact::TitleCitations => "titles-refs-hist",
            HistogramArtifact::AuthorCitations => "authors-refs-hist",
        }
    }
}

/// Every artifact a pipeline run reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Deduplicated metadata records
    Metadata,
    /// uid -> raw references
    RawReferences,
    /// uid -> linked canonical titles
    LinkedReferences,
    Graph(GraphArtifact),
    /// A graph reduced for plotting
    ReducedGraph(GraphArtifact),
    /// Node key -> integer label of a relabeled reduced graph
    LabelMapping(GraphArtifact),
    Histogram(HistogramArtifact),
}

impl Artifact {
    pub fn file_name(self) -> String {
        match self {
            Artifact::Metadata => "papers-metadata.json".to_string(),
            Artifact::RawReferences => "papers-raw-refs.json".to_string(),
            Artifact::LinkedReferences => "papers-refs.json".to_string(),
            Artifact::Graph(g) => format!("{}.json", g.stem()),
            Artifact::ReducedGraph(g) => format!("{}-reduced.json", g.stem()),
            Artifact::LabelMapping(g) => format!("{}-labels.json", g.stem()),
            Artifact::Histogram(h) => format!("{}.csv", h.stem()),
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// File layout of the artifacts, rooted at a data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.local/share/citegraph` or the platform equivalent
    pub fn default_root() -> PathBuf {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
        data_dir.join("citegraph")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, artifact: Artifact) -> PathBuf {
        self.root.join(artifact.file_name())
    }

    /// Where PDFs missing from the source exports are downloaded
    pub fn pdfs_dir(&self) -> PathBuf {
        self.root.join("pdfs")
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new(Self::default_root())
    }
}
