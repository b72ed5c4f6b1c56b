use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_PROBE_KEY: &str = "__storejs__";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Sentinel written and removed again by the startup probe
    pub probe_key: String,
    /// Probe the session instance as well as the local one
    pub probe_session: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            probe_key: DEFAULT_PROBE_KEY.to_string(),
            probe_session: false,
        }
    }
}

impl StoreConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.probe_key, "__storejs__");
        assert!(!config.probe_session);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = StoreConfig::from_json(r#"{"probe_session": true}"#).unwrap();
        assert_eq!(config.probe_key, DEFAULT_PROBE_KEY);
        assert!(config.probe_session);

        let config = StoreConfig::from_json("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(StoreConfig::from_json("probe_key = 1").is_err());
    }
}
