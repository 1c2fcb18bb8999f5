pub mod merge;
pub mod permissions;

pub use merge::{MergeOutcome, ResultMerger};
pub use permissions::PermissionsMerger;
