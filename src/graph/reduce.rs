//! Graph reduction and relabeling for plotting

use super::citation::CitationGraph;
use crate::histogram::{Frequency, Histogram};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Keep the `max_nodes` most important nodes and the edges among them.
///
/// Nodes are ranked by descending importance; nodes missing from `importance`
/// rank as zero. Ties are broken by ascending node key, so the result is
/// deterministic. Edges to excluded nodes are dropped.
pub fn reduce_graph<V: Frequency>(
    graph: &CitationGraph,
    importance: &Histogram<V>,
    max_nodes: usize,
) -> CitationGraph {
    let mut ranked: Vec<(String, f64)> = graph
        .node_closure()
        .into_iter()
        .map(|node| {
            let score = importance.get(&node).map(Frequency::to_f64).unwrap_or(0.0);
            (node, score)
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let kept: BTreeSet<String> = ranked.into_iter().take(max_nodes).map(|(n, _)| n).collect();
    let reduced = filter_graph(graph, &kept);
    tracing::debug!(
        before = graph.node_count(),
        after = reduced.node_count(),
        max_nodes,
        "reduced graph"
    );
    reduced
}

/// Restrict `graph` to `nodes`, dropping edges that leave the subset.
///
/// Every node of the subset that occurs in `graph`, as a key or only as an
/// edge target, is a key of the result.
pub fn filter_graph(graph: &CitationGraph, nodes: &BTreeSet<String>) -> CitationGraph {
    let present = graph.node_closure();
    let mut filtered = CitationGraph::with_nodes(nodes.intersection(&present).cloned());
    for (from, to) in graph.edges() {
        if nodes.contains(from) && nodes.contains(to) {
            filtered.add_edge(from, to);
        }
    }
    filtered
}

/// Dense integer labels for a graph's nodes, with the label mapping.
///
/// Labels are assigned in node-key order over keys and edge targets.
pub fn relabel_graph(graph: &CitationGraph) -> (CitationGraph, BTreeMap<String, usize>) {
    let mapping: BTreeMap<String, usize> = graph
        .node_closure()
        .into_iter()
        .enumerate()
        .map(|(label, node)| (node, label))
        .collect();

    let mut relabeled = CitationGraph::new();
    for (from, targets) in graph {
        let from_label = mapping[from].to_string();
        relabeled.add_node(from_label.clone());
        for to in targets {
            relabeled.add_edge(from_label.clone(), mapping[to].to_string());
        }
    }
    (relabeled, mapping)
}
