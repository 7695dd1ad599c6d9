//! Citation graphs over canonical keys

mod build;
mod citation;
mod reduce;

pub use build::{build_author_graph, build_forward_graph, build_reverse_graph};
pub use citation::CitationGraph;
pub use reduce::{filter_graph, reduce_graph, relabel_graph};
