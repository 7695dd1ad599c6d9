//! Paper metadata records
//!
//! Raw records arrive in one of several source shapes. They are converted once,
//! at construction, into the fixed [`MetadataRecord`] shape; nothing downstream
//! branches on the source shape again.

mod corpus;
mod dedup;
mod metadata;
mod source;

pub use corpus::{build_corpus, Corpus};
pub use dedup::{deduplicate_by_title, TitleCollision};
pub use metadata::{canonical_authors, content_uid, MetadataRecord, RecordError, RecordResult};
pub use source::{
    split_bibtex_authors, BibEntry, CrawledResult, ManagerExport, RawRecord, SourceFields,
    SourceKind, BIBTEX_PUBLICATION_TYPES,
};
