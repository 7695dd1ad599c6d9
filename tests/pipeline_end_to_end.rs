//! End-to-end runs of the pipeline over an on-disk corpus
//!
//! The fixture corpus mixes crawled results and BibTeX entries, contains a
//! duplicate title, a skipped book entry and a titleless entry, and has
//! precomputed references for two of its four papers.

mod common;

use citegraph::input::load_raw_records;
use citegraph::record::RecordResult;
use citegraph::storage::{Artifact, GraphArtifact, HistogramArtifact};
use citegraph::{
    ArtifactStore, CitationGraph, CoreConfig, FileStore, HistogramData, Pipeline,
    PrecomputedReferences, RawRecord, SourceKind,
};
use common::fixtures::{
    write_fixture_corpus, FixtureCorpus, ATTENTION, ATTENTION_DUPLICATE, GAT, RELATIONAL,
};
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

fn load_fixture_records(fixture: &FixtureCorpus) -> Vec<RecordResult<RawRecord>> {
    let mut raws = load_raw_records(&fixture.crawled_dir, SourceKind::CrawledResult)
        .expect("Failed to load crawled results");
    raws.extend(
        load_raw_records(&fixture.bibtex_file, SourceKind::BibliographyFileEntry)
            .expect("Failed to load bibtex entries"),
    );
    raws
}

fn run_fixture(config: CoreConfig, relabel: bool) -> (TempDir, Pipeline<FileStore>, citegraph::RunReport) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fixture = write_fixture_corpus(dir.path());
    let store = FileStore::open(dir.path().join("data")).expect("Failed to open store");
    let pipeline = Pipeline::new(store, config);

    let extractor =
        PrecomputedReferences::from_json_file(&fixture.refs_file).expect("Failed to read refs");
    let report = pipeline
        .run(load_fixture_records(&fixture), &extractor, relabel)
        .expect("Pipeline run failed");
    (dir, pipeline, report)
}

#[test]
fn test_run_reports_every_stage() {
    let (_dir, _pipeline, report) = run_fixture(CoreConfig::default(), false);

    // The book entry is skipped before parsing, the titleless misc entry is rejected.
    assert_eq!(report.metadata.accepted, 4);
    assert_eq!(report.metadata.rejected(), 1);
    assert_eq!(report.metadata.count("missing_required_field"), 1);
    assert_eq!(report.metadata.count("title_collision"), 1);

    assert_eq!(report.extraction.count("reference_extraction_failure"), 2);

    assert_eq!(report.linking.accepted, 4);
    assert_eq!(report.linking.linked_references, 3);
    assert_eq!(report.linking.unresolved_references, 1);
}

#[test]
fn test_run_writes_every_artifact() {
    let (_dir, pipeline, _report) = run_fixture(CoreConfig::default(), true);
    let store = pipeline.store();

    let mut expected = vec![
        Artifact::Metadata,
        Artifact::RawReferences,
        Artifact::LinkedReferences,
    ];
    for kind in GraphArtifact::ALL {
        expected.push(Artifact::Graph(kind));
    }
    for kind in [GraphArtifact::Titles, GraphArtifact::Authors] {
        expected.push(Artifact::ReducedGraph(kind));
        expected.push(Artifact::LabelMapping(kind));
    }
    for kind in [
        HistogramArtifact::TitleWords,
        HistogramArtifact::AbstractWords,
        HistogramArtifact::TitleCitations,
        HistogramArtifact::AuthorCitations,
    ] {
        expected.push(Artifact::Histogram(kind));
    }

    for artifact in expected {
        assert!(store.exists(artifact), "missing artifact {}", artifact);
    }
    assert!(store.paths().path(Artifact::Metadata).ends_with("papers-metadata.json"));
}

#[test]
fn test_duplicate_title_is_renamed_not_dropped() {
    let (_dir, pipeline, _report) = run_fixture(CoreConfig::default(), false);
    let records = pipeline.store().load_records().expect("Failed to load records");

    let titles: Vec<&str> = records.iter().map(|r| r.canonical_title.as_str()).collect();
    assert_eq!(titles, vec![ATTENTION, GAT, RELATIONAL, ATTENTION_DUPLICATE]);

    let gat = &records[1];
    assert_eq!(gat.uid, "arxiv:1710.10903");
    assert_eq!(gat.canonical_authors, vec!["cucurull", "velickovic"]);
    assert_eq!(gat.year, Some(2017));

    let relational = &records[2];
    assert_eq!(relational.uid, "doi:10.48550/arXiv.1806.01261");
    assert_eq!(relational.canonical_authors, vec!["battaglia", "hamrick"]);

    // No source id: the uid is the content hash.
    let duplicate = &records[3];
    assert_eq!(duplicate.uid, duplicate.content_uid);
    assert_eq!(duplicate.uid.len(), 40);
}

#[test]
fn test_title_graph_and_reverse() {
    let (_dir, pipeline, _report) = run_fixture(CoreConfig::default(), false);
    let store = pipeline.store();
    let titles = store.load_graph(GraphArtifact::Titles).expect("titles graph");
    let reverse = store.load_graph(GraphArtifact::TitlesReverse).expect("reverse graph");

    assert!(titles.is_total());
    assert_eq!(titles.node_count(), 4);
    assert!(titles.contains_edge(GAT, ATTENTION));
    assert!(titles.contains_edge(GAT, RELATIONAL));
    assert!(titles.contains_edge(RELATIONAL, ATTENTION));
    assert_eq!(titles.edge_count(), 3);

    // Papers whose extraction failed cite nothing but are still nodes.
    assert_eq!(titles.targets(ATTENTION).map(|t| t.len()), Some(0));
    assert_eq!(titles.targets(ATTENTION_DUPLICATE).map(|t| t.len()), Some(0));

    let citing: Vec<&str> = reverse
        .targets(ATTENTION)
        .expect("attention is a node")
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(citing, vec![GAT, RELATIONAL]);
    assert_eq!(reverse.edge_count(), titles.edge_count());
}

#[test]
fn test_author_graph() {
    let (_dir, pipeline, _report) = run_fixture(CoreConfig::default(), false);
    let authors = pipeline
        .store()
        .load_graph(GraphArtifact::Authors)
        .expect("authors graph");

    let cited_by = |author: &str| -> Vec<String> {
        authors
            .targets(author)
            .map(|t| t.iter().cloned().collect())
            .unwrap_or_default()
    };
    assert_eq!(cited_by("velickovic"), vec!["battaglia", "hamrick", "shazeer", "vaswani"]);
    assert_eq!(cited_by("cucurull"), cited_by("velickovic"));
    assert_eq!(cited_by("battaglia"), vec!["shazeer", "vaswani"]);
    assert!(cited_by("vaswani").is_empty());
    assert!(authors.is_total());
}

#[test]
fn test_histograms() {
    let (_dir, pipeline, _report) = run_fixture(CoreConfig::default(), false);
    let store = pipeline.store();

    let citations = store
        .load_histogram(HistogramArtifact::TitleCitations)
        .expect("citation histogram");
    let HistogramData::Counts(citations) = citations else {
        panic!("citation histograms hold raw counts");
    };
    assert_eq!(citations.get(ATTENTION), Some(2));
    assert_eq!(citations.get(RELATIONAL), Some(1));
    assert_eq!(citations.get(GAT), Some(0));
    assert_eq!(citations.len(), 4);

    let words = store
        .load_histogram(HistogramArtifact::TitleWords)
        .expect("title word histogram")
        .to_f64();
    assert_eq!(words.get("attention"), Some(3.0));
    assert_eq!(words.get("networks"), Some(2.0));
    assert!(!words.contains("is"), "stopwords are excluded");

    let csv = fs::read_to_string(store.paths().path(Artifact::Histogram(HistogramArtifact::TitleCitations)))
        .expect("read csv");
    assert!(csv.starts_with("term,frequency"));
}

#[test]
fn test_reduce_keeps_most_cited_and_relabels() {
    let config = CoreConfig::default().with_max_nodes(2);
    let (_dir, pipeline, _report) = run_fixture(config, true);
    let paths = pipeline.store().paths();

    let reduced: CitationGraph = serde_json::from_str(
        &fs::read_to_string(paths.path(Artifact::ReducedGraph(GraphArtifact::Titles)))
            .expect("read reduced graph"),
    )
    .expect("parse reduced graph");
    let labels: BTreeMap<String, usize> = serde_json::from_str(
        &fs::read_to_string(paths.path(Artifact::LabelMapping(GraphArtifact::Titles)))
            .expect("read labels"),
    )
    .expect("parse labels");

    assert_eq!(labels.len(), 2);
    assert_eq!(labels[ATTENTION], 0);
    assert_eq!(labels[RELATIONAL], 1);
    assert_eq!(reduced.node_count(), 2);
    assert!(reduced.contains_edge("1", "0"));
    assert_eq!(reduced.edge_count(), 1);
}

#[test]
fn test_stages_can_run_separately() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fixture = write_fixture_corpus(dir.path());
    let data = dir.path().join("data");

    {
        let pipeline = Pipeline::new(FileStore::open(&data).unwrap(), CoreConfig::default());
        pipeline
            .preprocess_metadata(load_fixture_records(&fixture))
            .expect("metadata stage");
        let extractor = PrecomputedReferences::from_json_file(&fixture.refs_file).unwrap();
        pipeline.extract_references(&extractor).expect("extract stage");
    }

    // A fresh store over the same directory picks up the saved artifacts.
    let pipeline = Pipeline::new(FileStore::open(&data).unwrap(), CoreConfig::default());
    let linking = pipeline.link_references().expect("link stage");
    assert_eq!(linking.linked_references, 3);
    let graphs = pipeline.make_graphs().expect("graphs stage");
    assert!(graphs.titles.contains_edge(GAT, ATTENTION));
}

#[test]
fn test_later_stage_without_inputs_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let pipeline = Pipeline::new(FileStore::open(dir.path()).unwrap(), CoreConfig::default());
    assert!(pipeline.link_references().is_err());
}
