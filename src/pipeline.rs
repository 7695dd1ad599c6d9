//! Pipeline stages
//!
//! Each stage loads its inputs from the artifact store and saves its outputs
//! back, so stages can be run one at a time or all in order with [`Pipeline::run`]:
//!
//! 1. metadata: raw records -> deduplicated `MetadataRecord`s
//! 2. extract: records -> raw references per uid
//! 3. link: raw references -> linked canonical titles per uid
//! 4. graphs: title and author citation graphs plus their reverses
//! 5. histograms: word frequencies and citation counts
//! 6. reduce: graphs cut down to their most cited nodes for plotting

use crate::config::CoreConfig;
use crate::error::{CiteGraphError, CiteGraphResult};
use crate::extract::{extract_corpus, ReferenceExtractor};
use crate::graph::{
    build_author_graph, build_forward_graph, build_reverse_graph, reduce_graph, relabel_graph,
    CitationGraph,
};
use crate::histogram::{
    citation_count_histogram, normalize, percentile_filter, word_frequency_histogram,
    HistogramData, TextField,
};
use crate::link::{link_corpus, KnownTitles};
use crate::record::{build_corpus, Corpus, RawRecord, RecordResult};
use crate::report::BatchReport;
use crate::storage::{ArtifactStore, GraphArtifact, HistogramArtifact};

/// The four citation graphs of a corpus
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSet {
    pub titles: CitationGraph,
    pub titles_reverse: CitationGraph,
    pub authors: CitationGraph,
    pub authors_reverse: CitationGraph,
}

impl GraphSet {
    pub fn get(&self, kind: GraphArtifact) -> &CitationGraph {
        match kind {
            GraphArtifact::Titles => &self.titles,
            GraphArtifact::TitlesReverse => &self.titles_reverse,
            GraphArtifact::Authors => &self.authors,
            GraphArtifact::AuthorsReverse => &self.authors_reverse,
        }
    }
}

/// Reports of the batch stages of a full run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub metadata: BatchReport,
    pub extraction: BatchReport,
    pub linking: BatchReport,
}

impl RunReport {
    pub fn issue_count(&self) -> usize {
        self.metadata.issues.len() + self.extraction.issues.len() + self.linking.issues.len()
    }
}

/// Runs stages against an artifact store with a fixed configuration
#[derive(Debug)]
pub struct Pipeline<S: ArtifactStore> {
    store: S,
    config: CoreConfig,
}

impl<S: ArtifactStore> Pipeline<S> {
    pub fn new(store: S, config: CoreConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Build and save the corpus. No accepted record is a batch failure.
    pub fn preprocess_metadata<I>(&self, raws: I) -> CiteGraphResult<BatchReport>
    where
        I: IntoIterator<Item = RecordResult<RawRecord>>,
    {
        let (corpus, report) = build_corpus(raws, &self.config.normalize_options());
        report.log_summary("metadata");
        if corpus.is_empty() {
            return Err(CiteGraphError::EmptyCorpus(format!(
                "all {} input records were rejected",
                report.rejected()
            )));
        }
        self.store.save_records(&corpus.records)?;
        Ok(report)
    }

    pub fn extract_references<E>(&self, extractor: &E) -> CiteGraphResult<BatchReport>
    where
        E: ReferenceExtractor + ?Sized,
    {
        let records = self.store.load_records()?;
        let (references, report) = extract_corpus(extractor, &records);
        report.log_summary("extract");
        self.store.save_raw_references(&references)?;
        Ok(report)
    }

    pub fn link_references(&self) -> CiteGraphResult<BatchReport> {
        let records = self.store.load_records()?;
        let raw = self.store.load_raw_references()?;
        let known = KnownTitles::from_records(&records);
        let corpus = Corpus::from_records(records);
        let (linked, report) = link_corpus(&corpus, &raw, &known);
        report.log_summary("link");
        self.store.save_linked_references(&linked)?;
        Ok(report)
    }

    pub fn make_graphs(&self) -> CiteGraphResult<GraphSet> {
        let records = self.store.load_records()?;
        let linked = self.store.load_linked_references()?;

        let titles = build_forward_graph(&records, &linked);
        let titles_reverse = build_reverse_graph(&titles);
        let authors = build_author_graph(&records, &titles);
        let authors_reverse = build_reverse_graph(&authors);
        let graphs = GraphSet {
            titles,
            titles_reverse,
            authors,
            authors_reverse,
        };

        for kind in GraphArtifact::ALL {
            self.store.save_graph(kind, graphs.get(kind))?;
        }
        Ok(graphs)
    }

    /// Word histograms honor the configured percentile cutoff and
    /// normalization; citation histograms are raw counts.
    pub fn make_histograms(&self) -> CiteGraphResult<()> {
        let records = self.store.load_records()?;
        let stopwords = self.config.stopword_set();

        for field in TextField::ALL {
            let mut hist = word_frequency_histogram(&records, field, &stopwords);
            if let Some(p) = self.config.percentile {
                hist = percentile_filter(&hist, p)?;
            }
            let data = if self.config.normalize_histograms {
                HistogramData::from(normalize(&hist))
            } else {
                HistogramData::from(hist)
            };
            let kind = match field {
                TextField::Title => HistogramArtifact::TitleWords,
                TextField::Abstract => HistogramArtifact::AbstractWords,
            };
            self.store.save_histogram(kind, &data)?;
        }

        for (graph, kind) in [
            (GraphArtifact::TitlesReverse, HistogramArtifact::TitleCitations),
            (GraphArtifact::AuthorsReverse, HistogramArtifact::AuthorCitations),
        ] {
            let reverse = self.store.load_graph(graph)?;
            let hist = citation_count_histogram(&reverse);
            self.store.save_histogram(kind, &HistogramData::from(hist))?;
        }
        Ok(())
    }

    /// Keep the most cited nodes of the title and author graphs.
    ///
    /// Without a configured `max_nodes` every node is kept. With `relabel`,
    /// node keys are replaced by integer labels and the mapping is saved too.
    pub fn reduce_graphs(&self, relabel: bool) -> CiteGraphResult<()> {
        let max_nodes = self.config.max_nodes.unwrap_or(usize::MAX);
        for (graph_kind, hist_kind) in [
            (GraphArtifact::Titles, HistogramArtifact::TitleCitations),
            (GraphArtifact::Authors, HistogramArtifact::AuthorCitations),
        ] {
            let graph = self.store.load_graph(graph_kind)?;
            let importance = self.store.load_histogram(hist_kind)?.to_f64();
            let reduced = reduce_graph(&graph, &importance, max_nodes);
            if relabel {
                let (labeled, mapping) = relabel_graph(&reduced);
                self.store.save_reduced_graph(graph_kind, &labeled, Some(&mapping))?;
            } else {
                self.store.save_reduced_graph(graph_kind, &reduced, None)?;
            }
        }
        Ok(())
    }

    /// Run every stage in order.
    pub fn run<I, E>(&self, raws: I, extractor: &E, relabel: bool) -> CiteGraphResult<RunReport>
    where
        I: IntoIterator<Item = RecordResult<RawRecord>>,
        E: ReferenceExtractor + ?Sized,
    {
        let metadata = self.preprocess_metadata(raws)?;
        let extraction = self.extract_references(extractor)?;
        let linking = self.link_references()?;
        self.make_graphs()?;
        self.make_histograms()?;
        self.reduce_graphs(relabel)?;
        Ok(RunReport {
            metadata,
            extraction,
            linking,
        })
    }
}
