//! Graph construction from a linked corpus

use super::citation::CitationGraph;
use crate::link::LinkedReferences;
use crate::record::MetadataRecord;
use std::collections::{BTreeSet, HashMap};

/// Title citation graph: canonical title -> canonical titles it cites.
///
/// The node set is the canonical titles of all records. Linked titles outside
/// the node set are dropped, and records without linked references map to the
/// empty set.
pub fn build_forward_graph(records: &[MetadataRecord], linked: &LinkedReferences) -> CitationGraph {
    let mut graph = CitationGraph::with_nodes(records.iter().map(|r| r.canonical_title.as_str()));
    let mut dropped = 0usize;

    for record in records {
        let Some(cited) = linked.get(&record.uid) else {
            continue;
        };
        for title in cited {
            if graph.contains_node(title) {
                graph.add_edge(record.canonical_title.as_str(), title.as_str());
            } else {
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "linked titles outside the corpus were dropped");
    }
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built title citation graph"
    );
    graph
}

/// Exact transpose of `graph`: node -> nodes that point to it.
///
/// The node set is the keys of `graph` plus every edge target, so the result is
/// total even when the input is not. Self-loops are preserved.
pub fn build_reverse_graph(graph: &CitationGraph) -> CitationGraph {
    let mut reverse = CitationGraph::with_nodes(graph.node_closure());
    for (from, to) in graph.edges() {
        reverse.add_edge(to, from);
    }
    reverse
}

/// Author citation graph: canonical author -> authors of the corpus papers
/// cited by any paper the author wrote.
///
/// The node set is every canonical author of the corpus. `title_graph` is the
/// forward title graph built over the same records.
pub fn build_author_graph(records: &[MetadataRecord], title_graph: &CitationGraph) -> CitationGraph {
    let mut graph = CitationGraph::with_nodes(
        records
            .iter()
            .flat_map(|r| r.canonical_authors.iter().map(String::as_str)),
    );

    let authors_by_title: HashMap<&str, &[String]> = records
        .iter()
        .map(|r| (r.canonical_title.as_str(), r.canonical_authors.as_slice()))
        .collect();

    for record in records {
        let Some(cited_titles) = title_graph.targets(&record.canonical_title) else {
            continue;
        };
        let cited_authors: BTreeSet<&str> = cited_titles
            .iter()
            .filter_map(|t| authors_by_title.get(t.as_str()))
            .flat_map(|authors| authors.iter().map(String::as_str))
            .collect();

        for author in &record.canonical_authors {
            for cited in &cited_authors {
                graph.add_edge(author.as_str(), *cited);
            }
        }
    }

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built author citation graph"
    );
    graph
}
