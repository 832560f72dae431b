//! Scheduler configuration.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default slack added to every travel estimate, in frames. Covers pathing
/// detours and command latency.
pub const DEFAULT_TRAVEL_MARGIN: u32 = 250;

/// Tunables for the production scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Frames added to every worker travel estimate.
    pub travel_margin: u32,
    /// Run the structure-morph phase. When off, structure morphs stay
    /// scheduled for an external collaborator to handle.
    pub structure_morphs: bool,
}

impl SchedulerConfig {
    /// Create a config with default tunables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the travel margin.
    #[must_use]
    pub fn with_travel_margin(mut self, frames: u32) -> Self {
        self.travel_margin = frames;
        self
    }

    /// Enable or disable the structure-morph phase.
    #[must_use]
    pub fn with_structure_morphs(mut self, enabled: bool) -> Self {
        self.structure_morphs = enabled;
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            travel_margin: DEFAULT_TRAVEL_MARGIN,
            structure_morphs: true,
        }
    }
}

/// Read and parse a JSON file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if it does not deserialise into `T`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.travel_margin, 250);
        assert!(config.structure_morphs);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SchedulerConfig::from_json(r#"{"travel_margin": 120}"#).unwrap();
        assert_eq!(config, SchedulerConfig::new().with_travel_margin(120));
    }

    #[test]
    fn test_malformed_json() {
        let err = SchedulerConfig::from_json("{travel_margin: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_json::<SchedulerConfig>(Path::new("/nonexistent/overmind.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/overmind.json"));
    }
}
