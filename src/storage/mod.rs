//! Artifact storage
//!
//! Pipeline stages exchange their artifacts through the `ArtifactStore` trait.
//! `FileStore` keeps them as JSON and CSV files under a data directory;
//! `MemoryStore` keeps them in memory.

mod csv_hist;
mod file;
mod memory;
mod paths;
mod traits;

pub use csv_hist::{read_histogram, write_histogram};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use paths::{Artifact, DataPaths, GraphArtifact, HistogramArtifact};
pub use traits::{ArtifactStore, LabelMapping, StorageError, StorageResult};
