//! Proptest strategies

use citegraph::CitationGraph;
use proptest::collection::{btree_set, vec};
use proptest::prelude::*;

/// Total citation graphs over nodes `n0..n{max_nodes}`.
///
/// Self-citations are allowed.
pub fn arb_graph(max_nodes: usize) -> impl Strategy<Value = CitationGraph> {
    (1..=max_nodes).prop_flat_map(|n| {
        vec(btree_set(0..n, 0..n), n).prop_map(move |targets| {
            let mut graph = CitationGraph::with_nodes((0..n).map(node));
            for (from, cited) in targets.into_iter().enumerate() {
                for to in cited {
                    graph.add_edge(node(from), node(to));
                }
            }
            graph
        })
    })
}

fn node(i: usize) -> String {
    format!("n{}", i)
}

/// Short title lists drawn from a small vocabulary so collisions are common.
pub fn arb_titles(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    let word = prop::sample::select(vec!["graph", "Graph", "networks", "attention", "deep", "Deep."]);
    vec(vec(word, 1..3).prop_map(|words| words.join(" ")), 0..max_len)
}
