//! Common test utilities for citegraph integration tests
//!
//! Provides a small on-disk corpus covering every source shape, and
//! proptest strategies for citation graphs and title lists.

#![allow(dead_code)]

pub mod fixtures;
pub mod strategies;
