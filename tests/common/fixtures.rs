//! A small mixed-source corpus written to disk
//!
//! Two crawled arXiv results, a BibTeX file with a duplicate title, a
//! non-publication entry and an entry without title, and precomputed
//! references for some of the papers.

use citegraph::{MetadataRecord, NormalizeOptions, SourceKind};
use citegraph::record::SourceFields;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

pub const ATTENTION: &str = "attention-is-all-you-need";
pub const ATTENTION_DUPLICATE: &str = "attention-is-all-you-need-2";
pub const GAT: &str = "graph-attention-networks";
pub const RELATIONAL: &str = "relational-inductive-biases-deep-learning-and-graph-networks";

/// Input locations of the fixture corpus
#[derive(Debug)]
pub struct FixtureCorpus {
    pub crawled_dir: PathBuf,
    pub bibtex_file: PathBuf,
    pub refs_file: PathBuf,
}

/// Write the fixture corpus under `dir`
pub fn write_fixture_corpus(dir: &Path) -> FixtureCorpus {
    let crawled_dir = dir.join("crawled");
    fs::create_dir_all(&crawled_dir).unwrap();
    write_json(
        &crawled_dir.join("1706.03762.json"),
        json!({"result": {
            "title": "Attention Is All You Need",
            "authors": ["Ashish Vaswani", "Noam Shazeer"],
            "submission_date": "2017-06-12",
            "arxiv_id": "1706.03762",
            "abstract": "The dominant sequence transduction models are based on recurrent networks."
        }}),
    );
    write_json(
        &crawled_dir.join("1710.10903.json"),
        json!({
            "title": "Graph Attention Networks",
            "authors": ["Petar Veličković", "Guillem Cucurull"],
            "submission_date": "2017-10-30",
            "arxiv_id": "1710.10903",
            "abstract": "We present graph attention networks, novel neural network architectures."
        }),
    );

    let bibtex_file = dir.join("entries.json");
    write_json(
        &bibtex_file,
        json!([
            {
                "ENTRYTYPE": "inproceedings",
                "title": "Relational inductive biases, deep learning,\nand graph networks",
                "author": "Battaglia, Peter W. and Hamrick, Jessica B.",
                "year": "2018",
                "doi": "10.48550/arXiv.1806.01261"
            },
            {
                "ENTRYTYPE": "article",
                "title": "Attention is all you need.",
                "author": "Vaswani, Ashish",
                "year": "2017"
            },
            {"ENTRYTYPE": "book", "title": "Deep Learning"},
            {"ENTRYTYPE": "misc", "author": "Anonymous"}
        ]),
    );

    let refs_file = dir.join("refs.json");
    write_json(
        &refs_file,
        json!({
            "arxiv:1710.10903": [
                {"title": "Attention is all you need", "raw_ref": "Vaswani et al. Attention is all you need. NIPS 2017."},
                "Relational inductive biases, deep learning, and graph networks. arXiv 2018.",
                "Some Unknown Paper. 2001."
            ],
            "doi:10.48550/arXiv.1806.01261": [
                ["Attention is all you need", "Vaswani"]
            ]
        }),
    );

    FixtureCorpus {
        crawled_dir,
        bibtex_file,
        refs_file,
    }
}

fn write_json(path: &Path, value: serde_json::Value) {
    fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

/// A crawled record with the given title and authors
pub fn record(title: &str, authors: &[&str]) -> MetadataRecord {
    MetadataRecord::from_fields(
        SourceKind::CrawledResult,
        SourceFields {
            title: Some(title.to_string()),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        },
        &NormalizeOptions::default(),
    )
    .unwrap()
}
