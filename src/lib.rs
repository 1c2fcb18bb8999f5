//! Cluster-wide reconciliation of flow-analysis results.
//!
//! Re-exports the data model from `flowrec-core` and the merger from
//! `flowrec-cluster`.

pub use flowrec_cluster::{MergeOutcome, PermissionsMerger, ResultMerger};
pub use flowrec_core::*;
