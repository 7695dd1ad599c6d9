//! Crate-level errors
//!
//! Only batch-level failures surface here. Per-record problems are collected
//! as [`BatchIssue`](crate::report::BatchIssue)s instead.

use crate::config::ConfigError;
use crate::histogram::HistogramError;
use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CiteGraphError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Histogram error: {0}")]
    Histogram(#[from] HistogramError),

    #[error("No usable records: {0}")]
    EmptyCorpus(String),
}

/// Result type for pipeline operations
pub type CiteGraphResult<T> = Result<T, CiteGraphError>;
