//! Scheduler configuration errors.

use overmind_plan::UnitType;

/// Errors that can occur while loading or validating scheduler configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid JSON for the expected type.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A morph table entry cannot be executed.
    #[error("invalid morph route {target} <- {from}: {reason}")]
    InvalidMorph {
        target: UnitType,
        from: UnitType,
        reason: &'static str,
    },
}
