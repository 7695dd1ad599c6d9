use super::Histogram;
use crate::graph::CitationGraph;

/// Number of citing nodes per node of a reverse graph.
///
/// Every node appears, uncited ones with zero.
pub fn citation_count_histogram(reverse: &CitationGraph) -> Histogram<u64> {
    reverse
        .iter()
        .map(|(node, citing)| (node.clone(), citing.len() as u64))
        .collect()
}
