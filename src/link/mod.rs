//! Reference linking
//!
//! Resolves each record's raw references to canonical titles of other records
//! in the same corpus.

mod linker;
mod reference;

pub use linker::{
    link_corpus, link_references, resolve_references, KnownTitles, LinkOutcome, LinkedReferences,
    RawReferences,
};
pub use reference::{ParsedReference, RawReference};
