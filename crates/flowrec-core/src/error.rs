use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowRecError {
    /// A violation arrived without its subject permission descriptor.
    #[error("Violation of rule '{rule_id}' from {source_name} has no permission descriptor")]
    MissingPermissions {
        rule_id: String,
        source_name: String,
    },

    #[error("Refusing to merge {count} node results (max_nodes = {max})")]
    TooManyNodes { count: usize, max: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to install tracing subscriber: {0}")]
    Telemetry(String),
}

pub type Result<T> = std::result::Result<T, FlowRecError>;
