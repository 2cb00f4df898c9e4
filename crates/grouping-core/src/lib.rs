//! Grouping Core
//!
//! Online greedy clustering of scalar measurements:
//! - **Cluster:** running mean/min/max accumulator with a fixed tolerance
//! - **Grouper:** single first-fit pass, clusters sorted by descending mean
//! - **Key extraction:** group arbitrary items by a derived scalar
//!
//! This crate is pure computation with no I/O.
//! All inputs are data; all outputs are data.

pub mod cluster;
pub mod grouper;
pub mod key;

pub use cluster::{Cluster, ClusterSummary, RunningStats};
pub use grouper::{group_by, group_items, Grouper, GroupingSession};
pub use key::{Identity, KeyFn, Scalar};
