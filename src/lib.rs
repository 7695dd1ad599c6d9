//! citegraph: Deduplicated citation graphs over academic paper corpora
//!
//! Canonicalizes noisy bibliographic identity into stable keys, links raw
//! reference strings back to papers of the same corpus, and derives citation
//! graphs and frequency histograms from the result.
//!
//! # Core Concepts
//!
//! - **Canonical keys**: normalized title and author strings used as identity
//! - **Corpus**: the deduplicated `MetadataRecord`s of one pipeline run
//! - **Citation graphs**: node -> cited nodes, always total, with exact reverses
//! - **Histograms**: word frequencies and citation counts
//!
//! # Example
//!
//! ```
//! use citegraph::{build_reverse_graph, normalize_title, CitationGraph};
//!
//! assert_eq!(
//!     normalize_title("Attention Is All You Need."),
//!     "attention-is-all-you-need"
//! );
//!
//! let mut graph = CitationGraph::new();
//! graph.add_edge("a", "b");
//! let reverse = build_reverse_graph(&graph);
//! assert!(reverse.contains_edge("b", "a"));
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod graph;
pub mod histogram;
pub mod input;
pub mod link;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod storage;

pub use config::{ConfigError, CoreConfig, StopwordConfig};
pub use error::{CiteGraphError, CiteGraphResult};
pub use extract::{CommandExtractor, ExtractError, PrecomputedReferences, ReferenceExtractor};
pub use graph::{
    build_author_graph, build_forward_graph, build_reverse_graph, reduce_graph, relabel_graph,
    CitationGraph,
};
pub use histogram::{
    citation_count_histogram, normalize, percentile_filter, word_frequency_histogram, Histogram,
    HistogramData, HistogramError, Stopwords, TextField,
};
pub use link::{link_corpus, link_references, KnownTitles, RawReference};
pub use normalize::{normalize_author, normalize_title, slugify, NormalizeOptions};
pub use pipeline::{GraphSet, Pipeline, RunReport};
pub use record::{
    build_corpus, content_uid, deduplicate_by_title, Corpus, MetadataRecord, RawRecord,
    RecordError, SourceKind,
};
pub use report::{BatchIssue, BatchReport};
pub use storage::{ArtifactStore, DataPaths, FileStore, MemoryStore, StorageError, StorageResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
