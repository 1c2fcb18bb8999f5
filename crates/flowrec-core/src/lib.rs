pub mod config;
pub mod error;
pub mod model;
pub mod telemetry;
pub mod view;

pub use config::{FlowRecConfig, LogConfig, MergeConfig, MissingPermissionsPolicy};
pub use error::{FlowRecError, Result};
pub use model::{
    ClusterResult, EnforcementPolicy, NodeIdentity, Permissions, Rule, RuleState, Violation,
    ViolationKey,
};
pub use telemetry::init_tracing;
pub use view::ResultView;
