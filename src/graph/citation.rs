//! CitationGraph: node key -> set of node keys it points to

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

/// A directed graph over canonical keys (titles or authors).
///
/// Serializes as a JSON object mapping each node key to an array of node keys.
/// Graphs built by this crate are total: every node that appears as a target
/// is also a key, mapped to the empty set when it has no outgoing edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CitationGraph(BTreeMap<String, BTreeSet<String>>);

impl CitationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph with the given nodes and no edges
    pub fn with_nodes<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(nodes.into_iter().map(|n| (n.into(), BTreeSet::new())).collect())
    }

    /// Add a node if absent
    pub fn add_node(&mut self, node: impl Into<String>) {
        self.0.entry(node.into()).or_default();
    }

    /// Add an edge, registering both endpoints as nodes
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let to = to.into();
        self.add_node(to.clone());
        self.0.entry(from.into()).or_default().insert(to);
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.0.contains_key(node)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.0.get(from).is_some_and(|targets| targets.contains(to))
    }

    /// Targets of `node`; `None` when the node is unknown
    pub fn targets(&self, node: &str) -> Option<&BTreeSet<String>> {
        self.0.get(node)
    }

    /// Node keys in lexical order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// All (from, to) pairs, ordered by source then target
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(from, targets)| targets.iter().map(move |to| (from.as_str(), to.as_str())))
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, BTreeSet<String>> {
        self.0.iter()
    }

    pub fn node_count(&self) -> usize {
        self.0.len()
    }

    pub fn edge_count(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every edge target is also a node key
    pub fn is_total(&self) -> bool {
        self.0
            .values()
            .flatten()
            .all(|target| self.0.contains_key(target))
    }

    /// Keys plus every edge target
    pub fn node_closure(&self) -> BTreeSet<String> {
        self.0
            .iter()
            .flat_map(|(from, targets)| std::iter::once(from).chain(targets))
            .cloned()
            .collect()
    }

    pub fn into_inner(self) -> BTreeMap<String, BTreeSet<String>> {
        self.0
    }
}

impl From<BTreeMap<String, BTreeSet<String>>> for CitationGraph {
    fn from(map: BTreeMap<String, BTreeSet<String>>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, BTreeSet<String>)> for CitationGraph {
    fn from_iter<T: IntoIterator<Item = (String, BTreeSet<String>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CitationGraph {
    type Item = (&'a String, &'a BTreeSet<String>);
    type IntoIter = btree_map::Iter<'a, String, BTreeSet<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
